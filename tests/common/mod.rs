// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

#![allow(dead_code)]

use frameconv::image::{Image, RGBA};
use std::error::Error;

/// YUY2 frame where every pixel is (`y`, `u`, `v`).
pub fn yuy2_constant(width: u32, height: u32, y: u8, u: u8, v: u8) -> Vec<u8> {
    [y, u, y, v].repeat((width * height / 2) as usize)
}

/// Smooth RGBA gradient that survives JPEG compression well.
pub fn gradient(width: u32, height: u32) -> Result<Image, Box<dyn Error>> {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[
                (x * 255 / (width - 1)) as u8,
                (y * 255 / (height - 1)) as u8,
                128,
                255,
            ]);
        }
    }
    Ok(Image::from_pixels(pixels, width, height, RGBA)?)
}

/// Mean absolute difference of the RGB channels of two RGBA buffers.
pub fn rgb_mean_abs_error(a: &[u8], b: &[u8]) -> f64 {
    assert_eq!(a.len(), b.len());
    let sum: u64 = a
        .chunks_exact(4)
        .zip(b.chunks_exact(4))
        .flat_map(|(pa, pb)| (0..3).map(move |c| pa[c].abs_diff(pb[c]) as u64))
        .sum();
    sum as f64 / (a.len() / 4 * 3) as f64
}

/// BT.601 limited range reference conversion.
pub fn bt601_limited(y: u8, u: u8, v: u8) -> [u8; 4] {
    let y = (y as f64 - 16.0) * 255.0 / 219.0;
    let cb = (u as f64 - 128.0) * 255.0 / 224.0;
    let cr = (v as f64 - 128.0) * 255.0 / 224.0;
    let clamp = |c: f64| c.round().clamp(0.0, 255.0) as u8;
    [
        clamp(y + 1.402 * cr),
        clamp(y - 0.344136 * cb - 0.714136 * cr),
        clamp(y + 1.772 * cb),
        255,
    ]
}

pub fn assert_pixel_near(actual: &[u8], expected: [u8; 4], tolerance: u8) {
    for c in 0..4 {
        assert!(
            actual[c].abs_diff(expected[c]) <= tolerance,
            "pixel {:?} differs from {:?} by more than {}",
            actual,
            expected,
            tolerance
        );
    }
}
