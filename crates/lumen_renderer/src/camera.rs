//! Camera: view setup, primary rays and the parallel render loop.
//!
//! A [`Camera`] is produced by [`CameraBuilder::build`], which checks every
//! required field, so a built camera is always renderable. Rendering splits
//! the image into buckets and traces them on a dedicated rayon pool.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use log::{debug, info};
use lumen_math::{align_zero, direction, is_zero, Color, Ray, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, UnitDisc};
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::{CameraError, ImageBuffer, RayTracer, RenderError};

/// Spreads pixel indices across the seed space.
const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Collects camera settings and validates them in [`CameraBuilder::build`].
pub struct CameraBuilder {
    location: Option<Vec3>,
    direction: Option<(Vec3, Vec3)>,
    width: f32,
    height: f32,
    distance: f32,
    image: Option<ImageBuffer>,
    tracer: Option<Box<dyn RayTracer>>,
    threads: usize,
    progress_interval: f32,
    antialiasing: u32,
    seed: u64,
}

impl Default for CameraBuilder {
    fn default() -> Self {
        Self {
            location: None,
            direction: None,
            width: 0.0,
            height: 0.0,
            distance: 0.0,
            image: None,
            tracer: None,
            threads: 1,
            progress_interval: 0.0,
            antialiasing: 1,
            seed: 0,
        }
    }
}

impl CameraBuilder {
    /// Camera position.
    pub fn location(mut self, location: Vec3) -> Self {
        self.location = Some(location);
        self
    }

    /// Viewing direction and up vector. They must be orthogonal.
    pub fn direction(mut self, to: Vec3, up: Vec3) -> Self {
        self.direction = Some((to, up));
        self
    }

    /// View plane size in scene units.
    pub fn viewport_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Distance from the camera to the view plane.
    pub fn viewport_distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }

    /// Output raster; its size sets the pixel grid.
    pub fn image(mut self, image: ImageBuffer) -> Self {
        self.image = Some(image);
        self
    }

    pub fn ray_tracer(mut self, tracer: impl RayTracer + 'static) -> Self {
        self.tracer = Some(Box::new(tracer));
        self
    }

    /// Worker threads used by [`Camera::render_image`].
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Log progress every `percent` of pixels; 0 disables.
    pub fn progress_interval(mut self, percent: f32) -> Self {
        self.progress_interval = percent;
        self
    }

    /// Rays per pixel. 1 traces only the pixel center.
    pub fn antialiasing(mut self, samples: u32) -> Self {
        self.antialiasing = samples;
        self
    }

    /// Base seed for per-pixel sampling.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate the settings and derive the camera basis.
    pub fn build(self) -> Result<Camera, CameraError> {
        let location = self.location.ok_or(CameraError::Missing("location"))?;
        let (to, up) = self.direction.ok_or(CameraError::Missing("direction"))?;
        let image = self.image.ok_or(CameraError::Missing("image"))?;
        let tracer = self.tracer.ok_or(CameraError::Missing("ray tracer"))?;

        let to = direction(to)?;
        let up = direction(up)?;
        if !is_zero(to.dot(up)) {
            return Err(CameraError::NotOrthogonal);
        }
        let right = direction(to.cross(up))?;

        for (field, value) in [
            ("width", self.width),
            ("height", self.height),
            ("distance", self.distance),
            ("image width", image.width as f32),
            ("image height", image.height as f32),
            ("antialiasing", self.antialiasing as f32),
        ] {
            if !(align_zero(value) > 0.0) {
                return Err(CameraError::NonPositive { field, value });
            }
        }
        if self.threads == 0 {
            return Err(CameraError::NoThreads);
        }

        Ok(Camera {
            location,
            to,
            up,
            right,
            width: self.width,
            height: self.height,
            distance: self.distance,
            image,
            tracer,
            threads: self.threads,
            progress_interval: self.progress_interval,
            antialiasing: self.antialiasing,
            seed: self.seed,
        })
    }
}

/// A pinhole camera bound to an output image and a ray tracer.
pub struct Camera {
    location: Vec3,
    to: Vec3,
    up: Vec3,
    right: Vec3,
    width: f32,
    height: f32,
    distance: f32,
    image: ImageBuffer,
    tracer: Box<dyn RayTracer>,
    threads: usize,
    progress_interval: f32,
    antialiasing: u32,
    seed: u64,
}

impl Camera {
    pub fn builder() -> CameraBuilder {
        CameraBuilder::default()
    }

    pub fn location(&self) -> Vec3 {
        self.location
    }

    /// Unit viewing direction.
    pub fn to(&self) -> Vec3 {
        self.to
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn image(&self) -> &ImageBuffer {
        &self.image
    }

    pub fn into_image(self) -> ImageBuffer {
        self.image
    }

    /// Center of pixel (`col`, `row`) on the view plane of an `nx` by `ny` grid.
    fn pixel_center(&self, nx: u32, ny: u32, col: u32, row: u32) -> Vec3 {
        let pc = self.location + self.to * self.distance;
        let rx = self.width / nx as f32;
        let ry = self.height / ny as f32;

        let xj = (col as f32 - (nx as f32 - 1.0) / 2.0) * rx;
        let yi = -(row as f32 - (ny as f32 - 1.0) / 2.0) * ry;

        pc + self.right * xj + self.up * yi
    }

    /// Ray from the camera through the center of pixel (`col`, `row`).
    ///
    /// Rows grow downwards, columns to the right.
    pub fn construct_ray(&self, nx: u32, ny: u32, col: u32, row: u32) -> Ray {
        let p = self.pixel_center(nx, ny, col, row);
        Ray::new(self.location, p - self.location)
    }

    fn pixel_rng(&self, col: u32, row: u32) -> StdRng {
        let index = row as u64 * self.image.width as u64 + col as u64;
        StdRng::seed_from_u64(self.seed ^ index.wrapping_mul(SEED_MIX))
    }

    /// Color of one pixel of the camera's image.
    ///
    /// Depends only on the pixel, the seed and the scene, never on which
    /// thread renders it.
    pub fn render_pixel(&self, col: u32, row: u32) -> Color {
        let (nx, ny) = (self.image.width, self.image.height);
        let mut rng = self.pixel_rng(col, row);

        let p = self.pixel_center(nx, ny, col, row);
        let mut color = self
            .tracer
            .trace_ray(&Ray::new(self.location, p - self.location), &mut rng);
        if self.antialiasing <= 1 {
            return color;
        }

        // Jitter over a disc inside the pixel
        let radius = 0.5 * (self.width / nx as f32).min(self.height / ny as f32);
        for _ in 1..self.antialiasing {
            let [x, y]: [f32; 2] = UnitDisc.sample(&mut rng);
            let target = p + self.right * (x * radius) + self.up * (y * radius);
            color += self
                .tracer
                .trace_ray(&Ray::new(self.location, target - self.location), &mut rng);
        }
        color / self.antialiasing as f32
    }

    fn report_progress(&self, done: &AtomicUsize, pixels: usize, total: usize) {
        if self.progress_interval <= 0.0 {
            return;
        }
        let before = done.fetch_add(pixels, Ordering::Relaxed);
        let after = before + pixels;
        let step = |n: usize| (n as f32 * 100.0 / total as f32 / self.progress_interval) as u32;
        if step(after) > step(before) {
            info!("Render progress: {:.1}%", after as f32 * 100.0 / total as f32);
        }
    }

    /// Trace every pixel into the camera's image.
    ///
    /// Buckets run in parallel on a pool of the configured size; the call
    /// blocks until the image is complete.
    pub fn render_image(&mut self) -> Result<&mut Self, RenderError> {
        let (nx, ny) = (self.image.width, self.image.height);
        let buckets = generate_buckets(nx, ny, DEFAULT_BUCKET_SIZE);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()?;

        info!(
            "Rendering {}x{} image: {} buckets, {} samples/pixel, {} threads",
            nx,
            ny,
            buckets.len(),
            self.antialiasing,
            self.threads
        );
        let start = Instant::now();
        let total = nx as usize * ny as usize;
        let done = AtomicUsize::new(0);

        let camera: &Camera = self;
        let results: Vec<BucketResult> = pool.install(|| {
            buckets
                .par_iter()
                .map(|bucket| {
                    let pixels = render_bucket(bucket, camera);
                    debug!(
                        "Bucket {} done ({}x{} at {},{})",
                        bucket.index, bucket.width, bucket.height, bucket.x, bucket.y
                    );
                    camera.report_progress(&done, pixels.len(), total);
                    BucketResult::new(*bucket, pixels)
                })
                .collect()
        });

        for result in results {
            let bucket = result.bucket;
            for (i, color) in result.pixels.into_iter().enumerate() {
                let i = i as u32;
                self.image
                    .set(bucket.x + i % bucket.width, bucket.y + i / bucket.width, color);
            }
        }

        info!("Image rendered in {:.2?}", start.elapsed());
        Ok(self)
    }

    /// Paint every `interval`-th row and column with `color`.
    pub fn print_grid(&mut self, interval: u32, color: Color) -> &mut Self {
        if interval == 0 {
            return self;
        }
        for y in 0..self.image.height {
            for x in 0..self.image.width {
                if x % interval == 0 || y % interval == 0 {
                    self.image.set(x, y, color);
                }
            }
        }
        self
    }

    /// Save the image as PNG.
    pub fn write_to_image<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        self.image.save_png(path)
    }
}
