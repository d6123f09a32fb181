// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Splitting of captured byte streams into individual frames.

use crate::{
    error::{ConvertError, Result},
    image::{image_size, YUYV},
};
use std::slice::ChunksExact;
use tracing::trace;

const SOI: u8 = 0xD8;
const EOI: u8 = 0xD9;
const SOS: u8 = 0xDA;
const TEM: u8 = 0x01;

enum FrameEnd {
    Complete(usize),
    Incomplete,
    Malformed,
}

/// Iterator over the JPEG frames of an MJPEG byte stream.
///
/// Frames are found by walking the JPEG marker segments rather than searching
/// for the next `FF D9`, so markers embedded in metadata (EXIF thumbnails)
/// do not cut a frame short. Bytes between frames are skipped, as are frames
/// whose segments run into the next frame or past the end of the data.
///
/// ```
/// use frameconv::stream::MjpegFrames;
///
/// let data = [0x00, 0xFF, 0xD8, 0xFF, 0xD9, 0x42];
/// let frames: Vec<&[u8]> = MjpegFrames::new(&data).collect();
/// assert_eq!(frames, vec![&data[1..5]]);
/// ```
pub struct MjpegFrames<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> MjpegFrames<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl<'a> Iterator for MjpegFrames<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        loop {
            let start = find_soi(self.data, self.pos)?;
            match frame_end(&self.data[start..]) {
                FrameEnd::Complete(len) => {
                    self.pos = start + len;
                    return Some(&self.data[start..start + len]);
                }
                // a truncated frame may still be followed by complete ones
                FrameEnd::Incomplete => {
                    trace!("skipping truncated frame at offset {}", start);
                    self.pos = start + 2;
                }
                FrameEnd::Malformed => {
                    trace!("skipping malformed frame at offset {}", start);
                    self.pos = start + 2;
                }
            }
        }
    }
}

fn find_soi(data: &[u8], from: usize) -> Option<usize> {
    data.get(from..)?
        .windows(2)
        .position(|w| w == [0xFF, SOI])
        .map(|i| from + i)
}

/// Length of the frame starting at `buf[0]`, which must be an SOI marker.
fn frame_end(buf: &[u8]) -> FrameEnd {
    let len = buf.len();
    let mut i = 2;

    loop {
        if i >= len {
            return FrameEnd::Incomplete;
        }
        if buf[i] != 0xFF {
            return FrameEnd::Malformed;
        }
        // any number of 0xFF fill bytes may precede a marker
        while i < len && buf[i] == 0xFF {
            i += 1;
        }
        if i >= len {
            return FrameEnd::Incomplete;
        }
        let marker = buf[i];
        i += 1;

        match marker {
            EOI => return FrameEnd::Complete(i),
            SOI | 0x00 => return FrameEnd::Malformed,
            TEM | 0xD0..=0xD7 => continue,
            _ => {}
        }

        if i + 2 > len {
            return FrameEnd::Incomplete;
        }
        let seg_len = u16::from_be_bytes([buf[i], buf[i + 1]]) as usize;
        if seg_len < 2 {
            return FrameEnd::Malformed;
        }
        i += seg_len;

        if marker == SOS {
            // entropy coded data runs until the next marker that is neither
            // a stuffed zero nor a restart marker
            loop {
                if i >= len {
                    return FrameEnd::Incomplete;
                }
                if buf[i] == 0xFF {
                    let Some(&next) = buf.get(i + 1) else {
                        return FrameEnd::Incomplete;
                    };
                    match next {
                        0x00 | 0xD0..=0xD7 => i += 2,
                        0xFF => i += 1,
                        _ => break,
                    }
                } else {
                    i += 1;
                }
            }
        }
    }
}

/// Splits back-to-back YUYV frames of `width` x `height` pixels. A trailing
/// partial frame is not returned.
pub fn yuyv_frames(data: &[u8], width: u32, height: u32) -> Result<ChunksExact<'_, u8>> {
    if width == 0 || height == 0 || width % 2 != 0 {
        return Err(ConvertError::dimensions(width, height));
    }
    let frame_len =
        image_size(width, height, YUYV).ok_or_else(|| ConvertError::dimensions(width, height))?;
    Ok(data.chunks_exact(frame_len))
}
