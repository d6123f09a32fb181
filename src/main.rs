// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

mod args;

use args::{Args, InputFormat, OutputEncoding};
use clap::Parser;
use frameconv::{
    converter_for,
    image::encode_jpeg,
    stream::{yuyv_frames, MjpegFrames},
    PixelConverter,
};
use serde_json::json;
use std::{
    error::Error,
    path::PathBuf,
    process::ExitCode,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::{sync::Semaphore, task::JoinSet};
use tracing::{debug, error, info, info_span, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

type FrameError = Box<dyn Error + Send + Sync>;

/// Per-frame settings shared by the conversion tasks.
struct Job {
    width: u32,
    height: u32,
    encode: OutputEncoding,
    quality: i32,
    output: PathBuf,
}

struct FrameReport {
    index: usize,
    path: PathBuf,
    bytes: usize,
    convert: Duration,
    encode: Duration,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(&args);

    let data = tokio::fs::read(&args.input).await?;
    let frames: Vec<Vec<u8>> = match args.format {
        InputFormat::Yuyv => yuyv_frames(&data, args.width(), args.height())?
            .map(<[u8]>::to_vec)
            .collect(),
        InputFormat::Mjpeg => MjpegFrames::new(&data).map(<[u8]>::to_vec).collect(),
    };
    if frames.is_empty() {
        warn!(
            "no {:?} frames found in {} ({} bytes)",
            args.format,
            args.input.display(),
            data.len()
        );
        return Ok(ExitCode::FAILURE);
    }
    drop(data);
    info!(
        "converting {} {:?} frames {}x{} from {}",
        frames.len(),
        args.format,
        args.width(),
        args.height(),
        args.input.display()
    );

    tokio::fs::create_dir_all(&args.output).await?;

    let converter: Arc<dyn PixelConverter> = Arc::from(converter_for(args.format.fourcc())?);
    let job = Arc::new(Job {
        width: args.width(),
        height: args.height(),
        encode: args.encode,
        quality: args.quality,
        output: args.output.clone(),
    });

    let start = Instant::now();
    let total = frames.len();
    let permits = Arc::new(Semaphore::new(args.jobs as usize));
    let mut tasks = JoinSet::new();

    for (index, frame) in frames.into_iter().enumerate() {
        // at most `jobs` frames are converted and encoded at once
        let permit = permits.clone().acquire_owned().await?;
        let converter = converter.clone();
        let job = job.clone();
        tasks.spawn_blocking(move || {
            let _permit = permit;
            let _span = info_span!("frame", index).entered();
            convert_frame(converter.as_ref(), index, &frame, &job).map_err(|e| (index, e))
        });
    }

    let mut failed = 0;
    while let Some(res) = tasks.join_next().await {
        match res {
            Ok(Ok(report)) => {
                if args.json {
                    println!(
                        "{}",
                        json!({
                            "frame": report.index,
                            "path": report.path.display().to_string(),
                            "bytes": report.bytes,
                            "convert_us": report.convert.as_micros() as u64,
                            "encode_us": report.encode.as_micros() as u64,
                        })
                    );
                }
            }
            Ok(Err((index, e))) => {
                error!("frame {} failed: {}", index, e);
                failed += 1;
            }
            Err(e) => {
                error!("conversion task failed: {}", e);
                failed += 1;
            }
        }
    }

    info!(
        "converted {}/{} frames in {:.2?}",
        total - failed,
        total,
        start.elapsed()
    );

    if failed > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn convert_frame(
    converter: &dyn PixelConverter,
    index: usize,
    frame: &[u8],
    job: &Job,
) -> Result<FrameReport, FrameError> {
    let now = Instant::now();
    let img = converter.convert(frame, job.width, job.height)?;
    let convert_time = now.elapsed();

    let now = Instant::now();
    let (path, bytes) = match job.encode {
        OutputEncoding::Rgba => {
            let path = job.output.join(format!("frame_{index:05}.rgba"));
            std::fs::write(&path, img.as_slice())?;
            (path, img.size())
        }
        OutputEncoding::Jpeg => {
            let jpeg = encode_jpeg(&img, job.quality)?;
            let path = job.output.join(format!("frame_{index:05}.jpeg"));
            std::fs::write(&path, &jpeg[..])?;
            (path, jpeg.len())
        }
    };
    let encode_time = now.elapsed();

    debug!(
        "frame {} image {} input: {}KB output: {}KB convert: {:?} encode: {:?}",
        index,
        img,
        frame.len() / 1024,
        bytes / 1024,
        convert_time,
        encode_time,
    );

    if let Some(client) = tracy_client::Client::running() {
        client.frame_mark();
    }

    Ok(FrameReport {
        index,
        path,
        bytes,
        convert: convert_time,
        encode: encode_time,
    })
}

fn init_tracing(args: &Args) {
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let stdout_log = tracing_subscriber::fmt::layer().with_filter(filter);

    let console = if args.tokio_console {
        Some(console_subscriber::spawn::<Registry>())
    } else {
        None
    };

    let tracy = if args.tracy {
        let _ = tracy_client::Client::start();
        Some(tracing_tracy::TracyLayer::default())
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(console)
        .with(stdout_log)
        .with(tracy)
        .init();
}
