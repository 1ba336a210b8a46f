//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Gamma correction
//! - Anti-aliasing via multi-sampling

use std::time::Instant;

use crate::{
    bucket::{generate_buckets, render_bucket, Bucket, BucketResult},
    error::{RenderError, RenderResult},
    sampling::gen_f32,
    Camera, Hittable, Ray,
};
use lumen_math::{Color, Interval};
use rand::RngCore;
use rayon::prelude::*;

/// Lower bound of the hit window; keeps scattered rays from re-hitting
/// the surface they leave (shadow acne).
pub const T_MIN: f32 = 0.001;

/// Channel range after gamma correction, before scaling to 8 bits.
const INTENSITY: Interval = Interval::new(0.0, 0.999);

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Sub-pixel jitter range as a fraction of a pixel, in [0, 1]
    ///
    /// Coordinates are normalized by `width - 1` and `height - 1`, so with
    /// a jitter above zero the last column and top row sample up to
    /// `jitter` pixels beyond the viewport edge (`u, v > 1`). The camera
    /// extrapolates those rays linearly.
    pub jitter: f32,
    /// Base seed; each bucket derives its own generator from it
    pub seed: u64,
    /// Render buckets on the rayon thread pool
    pub parallel: bool,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 100,
            max_depth: 50,
            jitter: 1.0,
            seed: 0,
            parallel: true,
            bucket_size: crate::DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    /// Reject settings that would break the render loop.
    pub fn validate(&self) -> RenderResult<()> {
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidSamplesPerPixel);
        }
        if !(0.0..=1.0).contains(&self.jitter) {
            return Err(RenderError::InvalidJitter(self.jitter));
        }
        if self.bucket_size == 0 {
            return Err(RenderError::InvalidBucketSize);
        }
        Ok(())
    }
}

/// Compute the color seen by a ray.
///
/// Each call consumes one unit of `depth`; a depth of zero contributes no
/// light, which bounds the recursion.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f32::INFINITY)) else {
        return sky_gradient(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            result.attenuation * ray_color(&result.scattered, world, depth - 1, rng)
        }
        // Absorbed
        None => Color::ZERO,
    }
}

/// Compute sky gradient background: white looking down, blue looking up.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.unit_direction();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Tone-map a sum of `samples_per_pixel` radiance samples to `[0, 255)`.
///
/// Averages, gamma-corrects, clamps to `[0, 0.999]` and scales by 255.
pub fn tone_map(sum: Color, samples_per_pixel: u32) -> Color {
    let scale = 1.0 / samples_per_pixel as f32;
    let channel = |c: f32| 255.0 * INTENSITY.clamp(linear_to_gamma(c * scale));
    Color::new(channel(sum.x), channel(sum.y), channel(sum.z))
}

/// Tone-map and truncate to 8-bit RGB.
pub fn color_to_rgb(sum: Color, samples_per_pixel: u32) -> [u8; 3] {
    let mapped = tone_map(sum, samples_per_pixel);
    [mapped.x as u8, mapped.y as u8, mapped.z as u8]
}

/// Buffer row for scene row `j`.
///
/// Scene rows count up from the bottom, buffer rows down from the top.
/// The mapping is its own inverse.
#[inline]
pub fn flip_row(j: u32, height: u32) -> u32 {
    height - 1 - j
}

/// Sum `samples_per_pixel` jittered samples for scene pixel `(i, j)`.
///
/// `i` counts columns left to right and `j` rows bottom to top. The result
/// is the raw sum; see [`tone_map`].
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    (i, j): (u32, u32),
    (width, height): (u32, u32),
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let u = viewport_coord(i, config.jitter * gen_f32(rng), width);
        let v = viewport_coord(j, config.jitter * gen_f32(rng), height);
        let ray = camera.get_ray(u, v);
        pixel_color += ray_color(&ray, world, config.max_depth, rng);
    }

    pixel_color
}

/// Map pixel `index` plus a sub-pixel `offset` to a viewport coordinate.
///
/// Index `0` maps to `0` and index `extent - 1` to `1`; the offset is not
/// rescaled, so it can push the last index past `1`.
#[inline]
fn viewport_coord(index: u32, offset: f32, extent: u32) -> f32 {
    let span = extent.saturating_sub(1).max(1) as f32;
    (index as f32 + offset) / span
}

/// Simple image buffer for storing render output.
///
/// Pixels are 8-bit RGB in row-major order, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 3]>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0]; (width as usize) * (height as usize)],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let index = self.index(x, y);
        self.pixels[index] = rgb;
    }

    /// Copy a finished bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (n, rgb) in result.pixels.iter().enumerate() {
            let n = n as u32;
            self.set(bucket.x + n % bucket.width, bucket.y + n / bucket.width, *rgb);
        }
    }

    /// Convert to an `image` crate buffer (for saving).
    pub fn to_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| image::Rgb(self.get(x, y)))
    }
}

/// Render the entire scene to an image buffer.
///
/// Buckets are rendered on the rayon pool when `config.parallel` is set and
/// in order otherwise. Each bucket seeds its own generator, so both paths
/// produce identical images for the same seed.
pub fn render_image(
    width: u32,
    height: u32,
    world: &dyn Hittable,
    camera: &Camera,
    config: &RenderConfig,
) -> RenderResult<ImageBuffer> {
    config.validate()?;
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimensions { width, height });
    }

    let buckets = generate_buckets(width, height, config.bucket_size);
    log::info!(
        "Rendering {}x{} @ {} spp, depth {} ({} buckets, {})",
        width,
        height,
        config.samples_per_pixel,
        config.max_depth,
        buckets.len(),
        if config.parallel { "parallel" } else { "sequential" }
    );

    let start = Instant::now();
    let render = |bucket: &Bucket| render_bucket(bucket, camera, world, (width, height), config);
    let results: Vec<BucketResult> = if config.parallel {
        buckets.par_iter().map(render).collect()
    } else {
        buckets.iter().map(render).collect()
    };

    let mut image = ImageBuffer::new(width, height);
    for result in &results {
        image.write_bucket(result);
    }

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(image)
}
