//! Render file: a scene plus camera and render settings.

use std::path::Path;

use anyhow::{Context, Result};
use lumen_core::SceneDescription;
use lumen_math::{Color, Vec3};
use serde::Deserialize;

use crate::cli::Args;

/// Camera placement and output resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct CameraDescription {
    pub location: [f32; 3],
    pub to: [f32; 3],
    pub up: [f32; 3],
    /// View plane width and height
    pub viewport: [f32; 2],
    /// View plane distance
    pub distance: f32,
    /// Image width and height in pixels
    pub resolution: [u32; 2],
}

impl CameraDescription {
    pub fn location(&self) -> Vec3 {
        Vec3::from_array(self.location)
    }

    pub fn to(&self) -> Vec3 {
        Vec3::from_array(self.to)
    }

    pub fn up(&self) -> Vec3 {
        Vec3::from_array(self.up)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GridDescription {
    pub interval: u32,
    pub color: [f32; 3],
}

impl GridDescription {
    pub fn color(&self) -> Color {
        Vec3::from_array(self.color)
    }
}

/// Tracer and render loop settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub threads: usize,
    pub antialiasing: u32,
    pub max_depth: u32,
    pub min_contribution: f32,
    pub seed: u64,
    /// Percent of pixels between progress log lines; 0 disables
    pub progress_interval: f32,
    /// Optional grid painted over the render
    pub grid: Option<GridDescription>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            threads: 1,
            antialiasing: 1,
            max_depth: 10,
            min_contribution: 0.001,
            seed: 0,
            progress_interval: 10.0,
            grid: None,
        }
    }
}

impl RenderSettings {
    /// Apply command-line overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(threads) = args.threads {
            self.threads = threads;
        }
        if let Some(antialiasing) = args.antialiasing {
            self.antialiasing = antialiasing;
        }
        if let Some(max_depth) = args.max_depth {
            self.max_depth = max_depth;
        }
    }
}

/// Top-level render file.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderFile {
    pub scene: SceneDescription,
    pub camera: CameraDescription,
    #[serde(default)]
    pub render: RenderSettings,
}

impl RenderFile {
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid render file")
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut file = Self::parse(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        if file.scene.name.is_none() {
            file.scene.name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_owned);
        }
        Ok(file)
    }
}
