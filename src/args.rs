// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use clap::Parser;
use frameconv::image::{FourCC, MJPG, YUYV};
use std::path::PathBuf;

/// Camera streaming format of the capture dump.
#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Copy)]
pub enum InputFormat {
    /// Back-to-back raw YUYV 4:2:2 frames
    Yuyv,
    /// Concatenated JPEG frames
    Mjpeg,
}

impl InputFormat {
    pub fn fourcc(self) -> FourCC {
        match self {
            InputFormat::Yuyv => YUYV,
            InputFormat::Mjpeg => MJPG,
        }
    }
}

/// Encoding of the converted frames written to the output directory.
#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Copy)]
pub enum OutputEncoding {
    /// Raw RGBA pixels, 4 bytes per pixel, no header
    Rgba,
    /// JPEG re-encoded from the RGBA pixels
    Jpeg,
}

/// Command-line arguments for the frame converter.
///
/// Converts every frame of a camera capture dump to RGBA and writes one file
/// per frame. Arguments can be specified via command line or environment
/// variables.
///
/// # Example
///
/// ```bash
/// # Via command line
/// frameconv capture.mjpeg --format mjpeg --frame-size "1280 720" -o frames
///
/// # Via environment variables
/// export FORMAT=yuyv
/// export FRAME_SIZE="640 480"
/// frameconv capture.yuv
/// ```
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Capture dump to convert
    #[arg(env = "INPUT")]
    pub input: PathBuf,

    /// Streaming format of the capture dump
    #[arg(short, long, env = "FORMAT", default_value = "mjpeg", value_enum)]
    pub format: InputFormat,

    /// Frame resolution in pixels (width height)
    #[arg(
        long,
        env = "FRAME_SIZE",
        default_value = "1920 1080",
        value_delimiter = ' ',
        num_args = 2
    )]
    pub frame_size: Vec<u32>,

    /// Directory receiving the converted frames
    #[arg(short, long, env = "OUTPUT", default_value = ".")]
    pub output: PathBuf,

    /// Encoding of the converted frames
    #[arg(long, env = "ENCODE", default_value = "jpeg", value_enum)]
    pub encode: OutputEncoding,

    /// JPEG quality when re-encoding frames
    #[arg(
        long,
        env = "JPEG_QUALITY",
        default_value = "90",
        value_parser = clap::value_parser!(i32).range(1..=100)
    )]
    pub quality: i32,

    /// Number of frames converted concurrently
    #[arg(
        short,
        long,
        env = "JOBS",
        default_value = "4",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub jobs: u32,

    /// Print one JSON report line per converted frame
    #[arg(long, env = "JSON")]
    pub json: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable Tokio async runtime console for debugging
    #[arg(long, env = "TOKIO_CONSOLE")]
    pub tokio_console: bool,

    /// Enable Tracy profiler for performance analysis
    #[arg(long, env = "TRACY")]
    pub tracy: bool,
}

impl Args {
    pub fn width(&self) -> u32 {
        self.frame_size[0]
    }

    pub fn height(&self) -> u32 {
        self.frame_size[1]
    }
}
