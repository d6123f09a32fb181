// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::error::{ConvertError, Result};
use core::fmt;
use std::str::FromStr;
use tracing::debug;
use turbojpeg::OwnedBuf;

/// Four character code identifying a pixel format.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct FourCC(pub [u8; 4]);

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for b in self.0 {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "FourCC({self})")
    }
}

impl FromStr for FourCC {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes: [u8; 4] = s
            .as_bytes()
            .try_into()
            .map_err(|_| ConvertError::UnsupportedPixelFormat(format!("{s:?} is not a FourCC")))?;
        Ok(FourCC(bytes))
    }
}

/// RGB 24-bit pixel format (8 bits per channel, no alpha)
pub const RGB3: FourCC = FourCC(*b"RGB3");

/// RGBX 32-bit pixel format (8 bits per channel, unused alpha)
pub const RGBX: FourCC = FourCC(*b"RGBX");

/// RGBA 32-bit pixel format (8 bits per channel, with alpha)
pub const RGBA: FourCC = FourCC(*b"RGBA");

/// YUYV 4:2:2 YUV packed format (common camera output format)
pub const YUYV: FourCC = FourCC(*b"YUYV");

/// Same byte layout as [`YUYV`], the name used by DirectShow and UVC drivers.
pub const YUY2: FourCC = FourCC(*b"YUY2");

/// Motion JPEG, one complete JPEG bitstream per frame
pub const MJPG: FourCC = FourCC(*b"MJPG");

/// Bytes per row for uncompressed formats, `None` for compressed or unknown
/// formats.
pub const fn format_row_stride(format: FourCC, width: u32) -> Option<usize> {
    match format {
        RGB3 => Some(3 * width as usize),
        RGBX => Some(4 * width as usize),
        RGBA => Some(4 * width as usize),
        YUYV | YUY2 => Some(2 * width as usize),
        _ => None,
    }
}

pub const fn image_size(width: u32, height: u32, format: FourCC) -> Option<usize> {
    match format_row_stride(format, width) {
        Some(stride) => Some(stride * height as usize),
        None => None,
    }
}

/// Heap-backed image buffer.
///
/// `Image` owns tightly packed pixel rows (no padding) for one of the
/// uncompressed formats understood by [`format_row_stride`]. RGBA results of
/// [`PixelConverter::convert`](crate::convert::PixelConverter::convert) are
/// returned as `Image`.
///
/// # Example
///
/// ```
/// use frameconv::image::{Image, RGBA};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let img = Image::new(1920, 1080, RGBA)?;
///
/// assert_eq!(img.width(), 1920);
/// assert_eq!(img.height(), 1080);
/// assert_eq!(img.format(), RGBA);
/// assert_eq!(img.size(), 1920 * 1080 * 4);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    format: FourCC,
}

impl Image {
    /// Allocates a zero filled image.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `width` or `height` is zero
    /// - `format` is compressed or unknown
    pub fn new(width: u32, height: u32, format: FourCC) -> Result<Self> {
        let size = checked_size(width, height, format)?;
        debug!("allocated {}x{} {} image ({} bytes)", width, height, format, size);
        Ok(Self {
            pixels: vec![0; size],
            width,
            height,
            format,
        })
    }

    /// Wraps existing pixels. Bytes past the end of the last row are
    /// discarded.
    ///
    /// # Errors
    ///
    /// Same as [`Image::new`], plus [`ConvertError::BufferTooSmall`] when
    /// `pixels` cannot hold the whole image.
    pub fn from_pixels(mut pixels: Vec<u8>, width: u32, height: u32, format: FourCC) -> Result<Self> {
        let size = checked_size(width, height, format)?;
        if pixels.len() < size {
            return Err(ConvertError::BufferTooSmall {
                needed: size,
                actual: pixels.len(),
            });
        }
        pixels.truncate(size);
        Ok(Self {
            pixels,
            width,
            height,
            format,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> FourCC {
        self.format
    }

    pub fn size(&self) -> usize {
        self.pixels.len()
    }

    pub fn row_stride(&self) -> usize {
        self.pixels.len() / self.height as usize
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.pixels
    }

    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}x{} {} {} bytes",
            self.width,
            self.height,
            self.format,
            self.pixels.len()
        )
    }
}

fn checked_size(width: u32, height: u32, format: FourCC) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(ConvertError::dimensions(width, height));
    }
    image_size(width, height, format).ok_or_else(|| {
        ConvertError::UnsupportedPixelFormat(format!("{format} has no fixed row stride"))
    })
}

/// Encodes an image to JPEG format using turbojpeg.
///
/// Uses the turbojpeg library with SIMD optimizations for fast JPEG
/// compression with 4:2:0 chroma subsampling, the layout most MJPEG cameras
/// emit.
///
/// # Arguments
///
/// * `img` - Source image, `RGBA`, `RGBX` or `RGB3`
/// * `quality` - JPEG quality, 1 to 100
///
/// # Errors
///
/// Returns an error if:
/// - The image is not in an RGB format
/// - JPEG compression fails
///
/// # Example
///
/// ```
/// use frameconv::image::{encode_jpeg, Image, RGBA};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let img = Image::new(640, 480, RGBA)?;
/// let jpeg = encode_jpeg(&img, 90)?;
/// println!("Compressed to {} bytes", jpeg.len());
/// # Ok(())
/// # }
/// ```
pub fn encode_jpeg(img: &Image, quality: i32) -> Result<OwnedBuf> {
    let format = match img.format() {
        RGBA => turbojpeg::PixelFormat::RGBA,
        RGBX => turbojpeg::PixelFormat::RGBX,
        RGB3 => turbojpeg::PixelFormat::RGB,
        other => {
            return Err(ConvertError::UnsupportedPixelFormat(format!(
                "cannot encode {other} as JPEG"
            )))
        }
    };

    let src = turbojpeg::Image {
        pixels: img.as_slice(),
        width: img.width() as usize,
        pitch: img.row_stride(),
        height: img.height() as usize,
        format,
    };

    turbojpeg::compress(src, quality, turbojpeg::Subsamp::Sub2x2).map_err(ConvertError::Encode)
}
