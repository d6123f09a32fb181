// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! C ABI entry points for the camera frame pipeline.
//!
//! The caller owns every buffer. Both functions return `0` on success or the
//! negative [`ConvertError::status`] code of the failure; a panic inside the
//! library is reported as [`STATUS_PANIC`] and never unwinds into the caller.

use crate::{
    convert::{MjpegConverter, PixelConverter, Yuy2Converter},
    error::{ConvertError, Result},
    image::{image_size, YUYV},
};
use libc::{c_int, size_t};
use std::{
    panic::{self, AssertUnwindSafe},
    slice::{from_raw_parts, from_raw_parts_mut},
};
use tracing::{error, warn};

pub const STATUS_OK: c_int = 0;
pub const STATUS_PANIC: c_int = -127;

/// Caller owned RGBA destination.
///
/// `pixels` must point to at least `capacity` writable bytes which stay
/// valid, and are not accessed by anyone else, for the duration of a call.
#[repr(C)]
#[derive(Debug)]
pub struct NativeImage {
    pub pixels: *mut u8,
    pub capacity: size_t,
    pub width: c_int,
    pub height: c_int,
}

impl NativeImage {
    /// Describes `pixels` as a `width` x `height` RGBA image.
    pub fn new(pixels: &mut [u8], width: c_int, height: c_int) -> Self {
        Self {
            pixels: pixels.as_mut_ptr(),
            capacity: pixels.len(),
            width,
            height,
        }
    }

    /// # Safety
    ///
    /// `pixels` and `capacity` must describe a live, exclusively borrowed
    /// allocation.
    unsafe fn as_slice_mut<'a>(&self) -> &'a mut [u8] {
        from_raw_parts_mut(self.pixels, self.capacity)
    }
}

/// Converts a YUY2 frame of `width` x `height` pixels into `output`.
///
/// # Safety
///
/// - `raw` must point to `width * height * 2` readable bytes
/// - `output` must point to a valid [`NativeImage`] whose `pixels` hold
///   `capacity` writable bytes
/// - neither buffer may be mutated by another thread during the call
#[no_mangle]
pub unsafe extern "C" fn frameconv_yuy2_to_rgba(
    raw: *const u8,
    width: c_int,
    height: c_int,
    output: *mut NativeImage,
) -> c_int {
    run("yuy2_to_rgba", || {
        let (width, height) = dimensions(width, height)?;
        let dst = destination(output, width, height)?;
        let len =
            image_size(width, height, YUYV).ok_or_else(|| ConvertError::dimensions(width, height))?;
        if raw.is_null() {
            return Err(ConvertError::NullPointer);
        }
        let src = from_raw_parts(raw, len);
        Yuy2Converter.convert_into(src, width, height, dst)
    })
}

/// Decompresses an MJPEG frame of `buffer_size` bytes into `output`.
///
/// The JPEG's own dimensions must equal `width` x `height`. A non-positive
/// `buffer_size` is handed to the codec as an empty stream and reported as a
/// decompression failure.
///
/// # Safety
///
/// - `raw` must point to `buffer_size` readable bytes
/// - `output` must point to a valid [`NativeImage`] whose `pixels` hold
///   `capacity` writable bytes
/// - neither buffer may be mutated by another thread during the call
#[no_mangle]
pub unsafe extern "C" fn frameconv_mjpeg_to_rgba(
    raw: *const u8,
    buffer_size: c_int,
    width: c_int,
    height: c_int,
    output: *mut NativeImage,
) -> c_int {
    run("mjpeg_to_rgba", || {
        let (width, height) = dimensions(width, height)?;
        let dst = destination(output, width, height)?;
        if raw.is_null() {
            return Err(ConvertError::NullPointer);
        }
        let src: &[u8] = match usize::try_from(buffer_size) {
            Ok(len) if len > 0 => from_raw_parts(raw, len),
            _ => &[],
        };
        MjpegConverter.convert_into(src, width, height, dst)
    })
}

fn run(name: &str, f: impl FnOnce() -> Result<()>) -> c_int {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => STATUS_OK,
        Ok(Err(e)) => {
            warn!("{} failed: {}", name, e);
            e.status()
        }
        Err(_) => {
            error!("{} panicked", name);
            STATUS_PANIC
        }
    }
}

fn dimensions(width: c_int, height: c_int) -> Result<(u32, u32)> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(ConvertError::dimensions(width, height)),
    }
}

/// # Safety
///
/// `output`, when not null, must point to a valid [`NativeImage`].
unsafe fn destination<'a>(output: *mut NativeImage, width: u32, height: u32) -> Result<&'a mut [u8]> {
    let output = output.as_ref().ok_or(ConvertError::NullPointer)?;
    if output.pixels.is_null() {
        return Err(ConvertError::NullPointer);
    }
    if output.width != width as c_int || output.height != height as c_int {
        return Err(ConvertError::DimensionMismatch {
            expected: (width, height),
            actual: (output.width.max(0) as u32, output.height.max(0) as u32),
        });
    }
    Ok(output.as_slice_mut())
}
