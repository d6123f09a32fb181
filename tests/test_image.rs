// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

mod common;

use frameconv::{
    image::{self, encode_jpeg, format_row_stride, FourCC, Image},
    ConvertError,
};
use std::error::Error;
use turbojpeg::{Decompressor, Subsamp};

#[test]
fn test_formats() -> Result<(), Box<dyn Error>> {
    let mut img = Image::new(1920, 1080, image::YUYV)?;
    println!("{}", img);
    assert_eq!(img.size(), 4147200);

    img = Image::new(1920, 1080, image::YUY2)?;
    println!("{}", img);
    assert_eq!(img.size(), 4147200);

    img = Image::new(1920, 1080, image::RGB3)?;
    println!("{}", img);
    assert_eq!(img.size(), 6220800);

    img = Image::new(1920, 1080, image::RGBA)?;
    println!("{}", img);
    assert_eq!(img.size(), 8294400);
    assert_eq!(img.row_stride(), 7680);

    Ok(())
}

#[test]
fn test_4k() -> Result<(), Box<dyn Error>> {
    let img = Image::new(3840, 2160, image::RGBA)?;
    assert_eq!(img.size(), 33177600);
    assert!(img.as_slice().iter().all(|&b| b == 0));
    Ok(())
}

#[test]
fn test_compressed_has_no_stride() {
    assert_eq!(format_row_stride(image::MJPG, 1920), None);
    let err = Image::new(1920, 1080, image::MJPG).unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedPixelFormat(_)));
}

#[test]
fn test_zero_size() {
    for (w, h) in [(0, 0), (0, 480), (640, 0)] {
        let err = Image::new(w, h, image::RGBA).unwrap_err();
        assert!(
            matches!(err, ConvertError::InvalidDimensions { .. }),
            "{w}x{h}: {err}"
        );
    }
}

#[test]
fn test_from_pixels() -> Result<(), Box<dyn Error>> {
    let img = Image::from_pixels(vec![1; 40], 3, 3, image::RGBA)?;
    assert_eq!(img.size(), 36);

    let err = Image::from_pixels(vec![1; 35], 3, 3, image::RGBA).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::BufferTooSmall {
            needed: 36,
            actual: 35
        }
    ));
    Ok(())
}

#[test]
fn test_fourcc() -> Result<(), Box<dyn Error>> {
    let fourcc: FourCC = "YUYV".parse()?;
    assert_eq!(fourcc, image::YUYV);
    assert_eq!(image::MJPG.to_string(), "MJPG");
    assert!("YUV".parse::<FourCC>().is_err());
    Ok(())
}

#[test]
fn test_display() -> Result<(), Box<dyn Error>> {
    let img = Image::new(4, 2, image::RGBA)?;
    assert_eq!(img.to_string(), "4x2 RGBA 32 bytes");
    Ok(())
}

#[test]
fn test_encode_jpeg() -> Result<(), Box<dyn Error>> {
    let img = common::gradient(320, 240)?;
    let jpeg = encode_jpeg(&img, 90)?;
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);

    let header = Decompressor::new()?.read_header(&jpeg)?;
    assert_eq!(header.width, 320);
    assert_eq!(header.height, 240);
    assert!(matches!(header.subsamp, Subsamp::Sub2x2));
    Ok(())
}

#[test]
fn test_encode_rejects_yuyv() -> Result<(), Box<dyn Error>> {
    let img = Image::new(320, 240, image::YUYV)?;
    let err = encode_jpeg(&img, 90).err().ok_or("YUYV encoded")?;
    assert!(matches!(err, ConvertError::UnsupportedPixelFormat(_)));
    Ok(())
}
