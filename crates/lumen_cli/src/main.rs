use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use lumen_renderer::{Camera, ImageBuffer, TracerConfig, WhittedTracer};

mod cli;
mod config;

use cli::Args;
use config::RenderFile;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    info!("Lumen v{}", env!("CARGO_PKG_VERSION"));

    let mut file = RenderFile::load(&args.input)?;
    file.render.apply_args(&args);
    let settings = &file.render;

    let scene = file
        .scene
        .build()
        .with_context(|| format!("Failed to build scene from {}", args.input.display()))?;

    let tracer = WhittedTracer::new(
        Arc::new(scene),
        TracerConfig {
            max_depth: settings.max_depth,
            min_contribution: settings.min_contribution,
        },
    )
    .context("Invalid tracer settings")?;

    let [nx, ny] = file.camera.resolution;
    let [width, height] = file.camera.viewport;
    let mut camera = Camera::builder()
        .location(file.camera.location())
        .direction(file.camera.to(), file.camera.up())
        .viewport_size(width, height)
        .viewport_distance(file.camera.distance)
        .image(ImageBuffer::new(nx, ny))
        .ray_tracer(tracer)
        .threads(settings.threads)
        .antialiasing(settings.antialiasing)
        .progress_interval(settings.progress_interval)
        .seed(settings.seed)
        .build()
        .context("Invalid camera")?;

    camera.render_image().context("Render failed")?;

    if let Some(grid) = settings.grid {
        camera.print_grid(grid.interval, grid.color());
    }

    camera
        .write_to_image(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}
