#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

mod aggregate;
mod cache;
mod pipeline;
mod render;

use clap::Parser;
use color_eyre::Result;
use pipeline::PipelineConfig;
use segmentation::SegmentOptions;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Turn a folder of photos into per-event storybook pages using a local
/// vision-language model.
#[derive(Parser, Debug)]
#[command(name = "storybook", version)]
struct Args {
    /// Directory of photos (JPEG/PNG), scanned recursively.
    #[arg(long)]
    photo_dir: PathBuf,

    /// Output directory for rendered pages and the insight cache.
    #[arg(long, default_value = "./out")]
    out_dir: PathBuf,

    /// Base URL of an OpenAI-compatible chat endpoint.
    #[arg(long, default_value = "http://localhost:11434")]
    base_url: String,

    /// Model name, e.g. llava:13b or qwen2-vl:7b.
    #[arg(long, default_value = "llava:13b")]
    model: String,

    #[arg(long, default_value_t = 0.25)]
    temperature: f32,

    /// Max elapsed time between consecutive same-event photos.
    #[arg(long, default_value_t = 6.0)]
    time_gap_hours: f64,

    /// Max great-circle distance between consecutive same-event photos.
    #[arg(long, default_value_t = 80.0)]
    distance_gap_km: f64,

    /// Minimum photo count for an event to be kept.
    #[arg(long, default_value_t = 3)]
    min_event_size: usize,

    #[arg(long, default_value_t = 40)]
    max_photos_per_event: usize,

    /// Ignore the cache and recompute per-photo insights.
    #[arg(long)]
    recompute: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    color_eyre::install()?;

    let args = Args::parse();
    let options = SegmentOptions {
        time_gap_hours: args.time_gap_hours,
        distance_gap_km: args.distance_gap_km,
        min_event_size: args.min_event_size,
    };
    options.validate()?;

    let config = PipelineConfig {
        photo_dir: args.photo_dir,
        out_dir: args.out_dir,
        base_url: args.base_url,
        model: args.model,
        temperature: args.temperature,
        max_photos_per_event: args.max_photos_per_event,
        recompute: args.recompute,
        options,
    };
    pipeline::run(&config).await
}
