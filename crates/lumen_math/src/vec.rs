//! Free helpers over [`Vec3`] that glam does not provide.

use glam::Vec3;

/// Color type alias (linear RGB, unbounded above until tone mapping)
pub type Color = Vec3;

/// Normalize `v`.
///
/// Precondition: `v` must have non-zero length. Normalizing a zero vector
/// yields NaN components; callers are expected to guard against it
/// (see [`near_zero`]).
#[inline]
pub fn unit_vector(v: Vec3) -> Vec3 {
    debug_assert!(
        v.length_squared() > 0.0,
        "unit_vector called on a zero-length vector"
    );
    v / v.length()
}

/// Clamp a scalar to `[min, max]`.
///
/// Unlike `f32::clamp` this never panics, so NaN inputs simply pass through.
#[inline]
pub fn clamp(x: f32, min: f32, max: f32) -> f32 {
    if x < min {
        min
    } else if x > max {
        max
    } else {
        x
    }
}

/// True if every component is within a tiny epsilon of zero.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    const EPS: f32 = 1e-8;
    v.x.abs() < EPS && v.y.abs() < EPS && v.z.abs() < EPS
}

/// Mirror `v` about the unit normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with unit normal `n`.
///
/// `etai_over_etat` is the ratio of refractive indices across the boundary.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
