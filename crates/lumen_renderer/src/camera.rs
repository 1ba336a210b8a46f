//! Camera for ray generation.

use crate::{
    error::{RenderError, RenderResult},
    Ray,
};
use lumen_math::Vec3;

/// Distance from the eye to the projection plane.
const FOCAL_LENGTH: f32 = 1.0;

/// Pinhole camera mapping normalized screen coordinates to rays.
///
/// All derived quantities are computed once at construction; the camera is
/// immutable afterwards and can be shared freely between render threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
}

impl Camera {
    /// Camera at the origin looking down -Z with +Y up.
    ///
    /// - `vfov`: vertical field of view in degrees, in (0, 180)
    /// - `aspect_ratio`: viewport width over height
    pub fn new(vfov: f32, aspect_ratio: f32) -> RenderResult<Self> {
        Self::look_at(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, vfov, aspect_ratio)
    }

    /// Camera placed at `look_from`, aimed at `look_at`, rolled so `vup`
    /// projects to screen-up.
    pub fn look_at(
        look_from: Vec3,
        look_at: Vec3,
        vup: Vec3,
        vfov: f32,
        aspect_ratio: f32,
    ) -> RenderResult<Self> {
        if !(vfov > 0.0 && vfov < 180.0) {
            return Err(RenderError::InvalidFieldOfView(vfov));
        }
        if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
            return Err(RenderError::InvalidAspectRatio(aspect_ratio));
        }

        // Calculate viewport dimensions
        let theta = vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = aspect_ratio * viewport_height;

        // Calculate camera basis vectors
        let w = (look_from - look_at).try_normalize().ok_or(RenderError::DegenerateView)?;
        let u = vup.cross(w).try_normalize().ok_or(RenderError::DegenerateView)?;
        let v = w.cross(u);

        let origin = look_from;
        let horizontal = viewport_width * u;
        let vertical = viewport_height * v;
        let lower_left_corner = origin - horizontal / 2.0 - vertical / 2.0 - FOCAL_LENGTH * w;

        Ok(Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
        })
    }

    /// Ray through normalized screen coordinates.
    ///
    /// `u` runs left to right and `v` bottom to top, both over `[0, 1]`.
    pub fn get_ray(&self, u: f32, v: f32) -> Ray {
        Ray::new(
            self.origin,
            self.lower_left_corner + u * self.horizontal + v * self.vertical - self.origin,
        )
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn lower_left_corner(&self) -> Vec3 {
        self.lower_left_corner
    }

    pub fn horizontal(&self) -> Vec3 {
        self.horizontal
    }

    pub fn vertical(&self) -> Vec3 {
        self.vertical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_camera_viewport() {
        // 90 degree fov: tan(45deg) = 1, so the viewport is 2 units high
        let camera = Camera::new(90.0, 2.0).unwrap();

        assert_eq!(camera.origin(), Vec3::ZERO);
        assert!(close(camera.horizontal(), Vec3::new(4.0, 0.0, 0.0)));
        assert!(close(camera.vertical(), Vec3::new(0.0, 2.0, 0.0)));
        assert!(close(camera.lower_left_corner(), Vec3::new(-2.0, -1.0, -1.0)));
    }

    #[test]
    fn test_camera_ray_direction() {
        let camera = Camera::new(90.0, 16.0 / 9.0).unwrap();

        // Center ray points straight down -Z
        let ray = camera.get_ray(0.5, 0.5);
        assert_eq!(ray.origin(), Vec3::ZERO);
        assert!(close(ray.direction(), Vec3::new(0.0, 0.0, -1.0)));

        // Corners
        let bottom_left = camera.get_ray(0.0, 0.0);
        assert!(close(bottom_left.direction(), camera.lower_left_corner()));
        let top_right = camera.get_ray(1.0, 1.0).direction();
        assert!(top_right.x > 0.0 && top_right.y > 0.0 && top_right.z < 0.0);
    }

    #[test]
    fn test_look_at_matches_default() {
        let a = Camera::new(60.0, 1.5).unwrap();
        let b = Camera::look_at(Vec3::ZERO, Vec3::new(0.0, 0.0, -5.0), Vec3::Y, 60.0, 1.5).unwrap();
        assert!(close(a.lower_left_corner(), b.lower_left_corner()));
        assert!(close(a.horizontal(), b.horizontal()));
        assert!(close(a.vertical(), b.vertical()));
    }

    #[test]
    fn test_look_at_aims_at_target() {
        let from = Vec3::new(3.0, 3.0, 2.0);
        let target = Vec3::new(0.0, 0.0, -1.0);
        let camera = Camera::look_at(from, target, Vec3::Y, 20.0, 1.0).unwrap();

        let ray = camera.get_ray(0.5, 0.5);
        assert_eq!(ray.origin(), from);
        assert!(close(ray.unit_direction(), (target - from).normalize()));
    }

    #[test]
    fn test_invalid_camera_rejected() {
        assert_eq!(Camera::new(0.0, 1.0).err(), Some(RenderError::InvalidFieldOfView(0.0)));
        assert!(Camera::new(180.0, 1.0).is_err());
        assert!(Camera::new(90.0, 0.0).is_err());
        assert!(Camera::new(90.0, f32::NAN).is_err());
        assert_eq!(
            Camera::look_at(Vec3::ONE, Vec3::ONE, Vec3::Y, 90.0, 1.0).err(),
            Some(RenderError::DegenerateView)
        );
        // Up vector parallel to the view direction
        assert!(Camera::look_at(Vec3::ZERO, Vec3::Y, Vec3::Y, 90.0, 1.0).is_err());
    }
}
