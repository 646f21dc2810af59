use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Render a Lumen scene file to PNG.
#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(about = "Whitted-style ray tracer")]
pub struct Args {
    /// Render file (JSON with scene, camera and render sections)
    pub input: PathBuf,

    /// Output PNG path
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Worker threads (overrides the render file)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Rays per pixel (overrides the render file)
    #[arg(short, long)]
    pub antialiasing: Option<u32>,

    /// Maximum recursion depth (overrides the render file)
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,
}
