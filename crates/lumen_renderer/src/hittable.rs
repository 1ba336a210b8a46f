//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Material, Ray};
use lumen_math::{Interval, Vec3};

/// Record of a ray-object intersection.
///
/// Returned by value from [`Hittable::hit`]; it borrows the material of the
/// object that produced it and lives no longer than that object.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection (unit length, always points against ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a dyn Material,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record, orienting `outward_normal` against the ray.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so `front_face` tracks which side of the surface was hit.
    pub fn new(
        ray: &Ray,
        t: f32,
        outward_normal: Vec3,
        material: &'a dyn Material,
    ) -> Self {
        // If the ray and normal point in the same direction, we're inside
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            p: ray.at(t),
            normal,
            material,
            t,
            front_face,
        }
    }
}

impl std::fmt::Debug for HitRecord<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitRecord")
            .field("p", &self.p)
            .field("normal", &self.normal)
            .field("t", &self.t)
            .field("front_face", &self.front_face)
            .finish_non_exhaustive()
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object strictly inside `ray_t`.
    ///
    /// Returns the nearest intersection in that window, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}

/// A list of hittable objects. Used as the scene.
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

/// The scene is an ordered list of primitives.
pub type Scene = HittableList;

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for object in &self.objects {
            let closest_so_far = closest.map_or(ray_t.max, |rec| rec.t);
            if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Sphere};
    use lumen_math::Color;
    use std::sync::Arc;

    fn sphere(center: Vec3, radius: f32) -> Box<dyn Hittable> {
        let material = Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
        Box::new(Sphere::new(center, radius, material).unwrap())
    }

    fn window() -> Interval {
        Interval::new(0.001, f32::INFINITY)
    }

    #[test]
    fn test_empty_list_misses() {
        let world = HittableList::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(world.is_empty());
        assert!(world.hit(&ray, window()).is_none());
    }

    #[test]
    fn test_nearest_hit_wins_regardless_of_order() {
        let near = Vec3::new(0.0, 0.0, -1.0);
        let far = Vec3::new(0.0, 0.0, -3.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let t_near = sphere(near, 0.5).hit(&ray, window()).unwrap().t;
        let t_far = sphere(far, 1.0).hit(&ray, window()).unwrap().t;
        let expected = t_near.min(t_far);

        let mut far_first = HittableList::new();
        far_first.add(sphere(far, 1.0));
        far_first.add(sphere(near, 0.5));

        let mut near_first = HittableList::new();
        near_first.add(sphere(near, 0.5));
        near_first.add(sphere(far, 1.0));

        assert_eq!(far_first.len(), 2);
        assert_eq!(far_first.hit(&ray, window()).unwrap().t, expected);
        assert_eq!(near_first.hit(&ray, window()).unwrap().t, expected);
        assert!((expected - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_overlapping_spheres_pick_smallest_root() {
        // Two overlapping spheres along the same ray
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let a = sphere(Vec3::ZERO, 1.0);
        let b = sphere(Vec3::new(0.0, 0.0, 0.5), 1.0);

        let t_a = a.hit(&ray, window()).unwrap().t;
        let t_b = b.hit(&ray, window()).unwrap().t;

        let mut world = HittableList::new();
        world.add(a);
        world.add(b);

        let rec = world.hit(&ray, window()).unwrap();
        assert_eq!(rec.t, t_a.min(t_b));
        assert!((rec.t - 3.5).abs() < 1e-5);
    }

    #[test]
    fn test_hit_outside_window_is_ignored() {
        let mut world = HittableList::new();
        world.add(sphere(Vec3::new(0.0, 0.0, -1.0), 0.5));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        // Both roots (0.5 and 1.5) lie beyond the window
        assert!(world.hit(&ray, Interval::new(0.001, 0.4)).is_none());
    }

    #[test]
    fn test_record_faces_against_ray() {
        let material = Lambertian::new(Color::ONE);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let front = HitRecord::new(&ray, 1.0, Vec3::Z, &material);
        assert!(front.front_face);
        assert_eq!(front.normal, Vec3::Z);
        assert_eq!(front.p, Vec3::new(0.0, 0.0, -1.0));

        let back = HitRecord::new(&ray, 1.0, Vec3::NEG_Z, &material);
        assert!(!back.front_face);
        assert_eq!(back.normal, Vec3::Z);
    }
}
