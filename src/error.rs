// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use thiserror::Error;

/// Errors reported by the frame conversions.
///
/// Every size check happens before the colorspace library or the JPEG codec
/// touches a buffer, so an error always means the destination was left
/// unmodified except for [`ConvertError::CodecDecompressionFailed`], where
/// the codec may have written a partial image.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("JPEG decompression failed: {0}")]
    CodecDecompressionFailed(#[source] turbojpeg::Error),

    #[error("unsupported pixel format: {0}")]
    UnsupportedPixelFormat(String),

    #[error("expected {}x{}, found {}x{}", expected.0, expected.1, actual.0, actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("colorspace conversion failed: {0}")]
    Conversion(#[from] yuvutils_rs::YuvError),

    #[error("JPEG compression failed: {0}")]
    Encode(#[source] turbojpeg::Error),

    #[error("null pointer")]
    NullPointer,
}

impl ConvertError {
    pub(crate) fn dimensions(width: impl Into<i64>, height: impl Into<i64>) -> Self {
        ConvertError::InvalidDimensions {
            width: width.into(),
            height: height.into(),
        }
    }

    /// Status code reported across the C ABI. Success is `0`.
    pub fn status(&self) -> i32 {
        match self {
            ConvertError::InvalidDimensions { .. } => -1,
            ConvertError::BufferTooSmall { .. } => -2,
            ConvertError::CodecDecompressionFailed(_) => -3,
            ConvertError::UnsupportedPixelFormat(_) => -4,
            ConvertError::DimensionMismatch { .. } => -5,
            ConvertError::Conversion(_) => -6,
            ConvertError::Encode(_) => -7,
            ConvertError::NullPointer => -8,
        }
    }
}

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;
