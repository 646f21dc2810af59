//! Lumen Renderer - Whitted-style CPU ray tracing
//!
//! Phong local lighting with shadow rays, recursive reflection and
//! transmission, optional glossy beams, and a bucket-parallel camera.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use lumen_renderer::{Camera, ImageBuffer, TracerConfig, WhittedTracer};
//!
//! let tracer = WhittedTracer::new(Arc::new(scene), TracerConfig::default())?;
//! let mut camera = Camera::builder()
//!     .location(Vec3::ZERO)
//!     .direction(-Vec3::Z, Vec3::Y)
//!     .viewport_size(200.0, 200.0)
//!     .viewport_distance(1000.0)
//!     .image(ImageBuffer::new(500, 500))
//!     .ray_tracer(tracer)
//!     .threads(8)
//!     .build()?;
//! camera.render_image()?.write_to_image("out.png")?;
//! ```

mod beam;
mod bucket;
mod camera;
mod error;
mod image_buffer;
mod tracer;

pub use beam::generate_beam;
pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, CameraBuilder};
pub use error::{CameraError, RenderError, TracerConfigError};
pub use image_buffer::{color_to_rgb, ImageBuffer};
pub use tracer::{RayTracer, TracerConfig, WhittedTracer};

/// Re-export common math types from lumen_math
pub use lumen_math::{Color, Ray, Vec3};
