// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! # Camera Frame Conversion Library
//!
//! This library turns raw camera frames into RGBA images for a frame
//! processing pipeline. It handles the two formats UVC cameras stream:
//! packed YUY2 (YUYV 4:2:2) and MJPEG.
//!
//! ## Features
//!
//! - **YUY2 to RGBA**: BT.601 limited range conversion using the SIMD
//!   kernels of `yuvutils-rs`.
//! - **MJPEG to RGBA**: JPEG decompression straight into the destination
//!   buffer using turbojpeg (libjpeg-turbo).
//! - **Checked buffers**: every size is validated against the stated
//!   dimensions before a library touches memory, and codec failures are
//!   reported instead of leaving stale pixels behind silently.
//! - **C ABI**: `frameconv_yuy2_to_rgba` and `frameconv_mjpeg_to_rgba` for
//!   callers on the other side of a foreign function boundary.
//! - **Stream splitting**: iterate the frames of MJPEG and YUYV capture
//!   dumps.
//!
//! ## Example
//!
//! ```
//! use frameconv::{
//!     convert::{converter_for, rgba_len},
//!     image::YUYV,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Four white YUY2 pixels
//! let yuy2 = [235u8, 128, 235, 128, 235, 128, 235, 128];
//! let mut rgba = vec![0; rgba_len(2, 2)?];
//!
//! let converter = converter_for(YUYV)?;
//! converter.convert_into(&yuy2, 2, 2, &mut rgba)?;
//! assert!(rgba.chunks_exact(4).all(|px| px[3] == 255));
//! # Ok(())
//! # }
//! ```
//!
//! ## Safety
//!
//! `unsafe` code is confined to the [`ffi`] module, which turns the caller's
//! pointers into slices after validating them.

pub mod convert;
pub mod error;
pub mod ffi;
pub mod image;
pub mod stream;

pub use convert::{converter_for, MjpegConverter, PixelConverter, Yuy2Converter};
pub use error::ConvertError;
