//! Lumen renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer over spheres with diffuse, metal and glass
//! materials. Rendering is driven through [`render_image`].

mod error;
mod ray;
mod hittable;
mod material;
mod sphere;
mod camera;
mod renderer;
mod bucket;
pub mod sampling;

pub use error::{RenderError, RenderResult};
pub use ray::Ray;
pub use hittable::{HitRecord, Hittable, HittableList, Scene};
pub use material::{Material, ScatterResult, Lambertian, Metal, Dielectric};
pub use sphere::Sphere;
pub use camera::Camera;
pub use renderer::{
    RenderConfig, ImageBuffer, render_image, render_pixel, ray_color, sky_gradient,
    tone_map, color_to_rgb, linear_to_gamma, flip_row, T_MIN,
};
pub use bucket::{Bucket, BucketResult, generate_buckets, render_bucket, DEFAULT_BUCKET_SIZE};

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Color, Interval, Vec3};
