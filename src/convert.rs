// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::{
    error::{ConvertError, Result},
    image::{Image, FourCC, MJPG, RGBA, YUY2, YUYV},
};
use tracing::{debug, instrument, trace};
use turbojpeg::{Colorspace, Decompressor, PixelFormat};
use yuvutils_rs::{YuvPackedImage, YuvRange, YuvStandardMatrix};

/// Converts one camera frame into RGBA pixels.
///
/// Implementations are stateless: every call stands alone, so a single
/// converter may be shared between threads and called concurrently as long
/// as each call gets its own destination buffer.
pub trait PixelConverter: Send + Sync {
    /// Pixel format of the frames this converter accepts.
    fn source_format(&self) -> FourCC;

    /// Converts `raw` into the caller owned RGBA buffer `dst`.
    ///
    /// `dst` must hold at least `width * height * 4` bytes; only that prefix
    /// is written. Sizes are validated before any pixel is touched.
    fn convert_into(&self, raw: &[u8], width: u32, height: u32, dst: &mut [u8]) -> Result<()>;

    /// Converts `raw` into a freshly allocated RGBA [`Image`].
    fn convert(&self, raw: &[u8], width: u32, height: u32) -> Result<Image> {
        let mut img = Image::new(width, height, RGBA)?;
        self.convert_into(raw, width, height, img.as_slice_mut())?;
        Ok(img)
    }
}

/// Selects the converter for a camera streaming format.
///
/// # Errors
///
/// Returns [`ConvertError::UnsupportedPixelFormat`] for anything other than
/// `YUYV`, `YUY2` or `MJPG`.
pub fn converter_for(format: FourCC) -> Result<Box<dyn PixelConverter>> {
    match format {
        YUYV | YUY2 => Ok(Box::new(Yuy2Converter)),
        MJPG => Ok(Box::new(MjpegConverter)),
        other => Err(ConvertError::UnsupportedPixelFormat(format!(
            "no RGBA converter for {other}"
        ))),
    }
}

/// Byte length of a `width` x `height` RGBA image.
pub fn rgba_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(ConvertError::dimensions(width, height));
    }
    width
        .checked_mul(4)
        .and_then(|stride| (stride as usize).checked_mul(height as usize))
        .ok_or_else(|| ConvertError::dimensions(width, height))
}

fn check_len(needed: usize, actual: usize) -> Result<()> {
    if actual < needed {
        return Err(ConvertError::BufferTooSmall { needed, actual });
    }
    Ok(())
}

/// YUY2 (YUYV 4:2:2) to RGBA using BT.601 limited range coefficients.
///
/// Luma 16 maps to black and 235 to white, chroma is centred on 128. Alpha is
/// always 255.
#[derive(Debug, Default, Clone, Copy)]
pub struct Yuy2Converter;

impl PixelConverter for Yuy2Converter {
    fn source_format(&self) -> FourCC {
        YUYV
    }

    #[instrument(name = "yuy2_to_rgba", skip_all, fields(width = width, height = height))]
    fn convert_into(&self, raw: &[u8], width: u32, height: u32, dst: &mut [u8]) -> Result<()> {
        // pixels are stored in pairs sharing one U and one V sample
        if width % 2 != 0 {
            return Err(ConvertError::dimensions(width, height));
        }
        let dst_len = rgba_len(width, height)?;
        let src_len = dst_len / 2;
        check_len(src_len, raw.len())?;
        check_len(dst_len, dst.len())?;

        let src = YuvPackedImage {
            yuy: &raw[..src_len],
            yuy_stride: width * 2,
            width,
            height,
        };
        yuvutils_rs::yuyv422_to_rgba(
            &src,
            &mut dst[..dst_len],
            width * 4,
            YuvRange::Limited,
            YuvStandardMatrix::Bt601,
        )?;

        trace!("converted {} YUY2 bytes", src_len);
        Ok(())
    }
}

/// Decompresses one MJPEG frame (a complete JPEG bitstream) straight into
/// RGBA pixels.
///
/// A decompressor is created for every call and released when the call
/// returns, successful or not. The frame's encoded size must match the
/// requested `width` and `height`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MjpegConverter;

impl PixelConverter for MjpegConverter {
    fn source_format(&self) -> FourCC {
        MJPG
    }

    #[instrument(name = "mjpeg_to_rgba", skip_all, fields(width = width, height = height, len = raw.len()))]
    fn convert_into(&self, raw: &[u8], width: u32, height: u32, dst: &mut [u8]) -> Result<()> {
        let dst_len = rgba_len(width, height)?;
        check_len(dst_len, dst.len())?;

        let mut decompressor =
            Decompressor::new().map_err(ConvertError::CodecDecompressionFailed)?;
        let header = decompressor
            .read_header(raw)
            .map_err(ConvertError::CodecDecompressionFailed)?;

        if matches!(header.colorspace, Colorspace::CMYK | Colorspace::YCCK) {
            return Err(ConvertError::UnsupportedPixelFormat(format!(
                "{:?} JPEG cannot be decoded to RGBA",
                header.colorspace
            )));
        }
        if header.width != width as usize || header.height != height as usize {
            return Err(ConvertError::DimensionMismatch {
                expected: (width, height),
                actual: (header.width as u32, header.height as u32),
            });
        }

        let image = turbojpeg::Image {
            pixels: &mut dst[..dst_len],
            width: header.width,
            pitch: header.width * 4,
            height: header.height,
            format: PixelFormat::RGBA,
        };
        decompressor
            .decompress(raw, image)
            .map_err(ConvertError::CodecDecompressionFailed)?;

        debug!(
            "decompressed {}x{} {:?} {:?}",
            header.width, header.height, header.colorspace, header.subsamp
        );
        Ok(())
    }
}

/// Converts a YUY2 frame into the caller owned RGBA buffer `dst`.
///
/// Shorthand for [`Yuy2Converter::convert_into`].
pub fn yuy2_to_rgba(raw: &[u8], width: u32, height: u32, dst: &mut [u8]) -> Result<()> {
    Yuy2Converter.convert_into(raw, width, height, dst)
}

/// Decompresses an MJPEG frame into the caller owned RGBA buffer `dst`.
///
/// Shorthand for [`MjpegConverter::convert_into`].
pub fn mjpeg_to_rgba(raw: &[u8], width: u32, height: u32, dst: &mut [u8]) -> Result<()> {
    MjpegConverter.convert_into(raw, width, height, dst)
}
