use crate::{
    hittable::{HitRecord, Hittable},
    interval::Interval,
    material::Material,
    ray::Ray,
};
use glam::Vec3A;
use std::sync::Arc;

/// A sphere given by center and radius.
#[derive(Clone, Debug)]
pub struct Sphere {
    center: Vec3A,
    radius: f32,
    material: Arc<dyn Material>,
}

impl Sphere {
    /// Negative radii are clamped to zero.
    pub fn new(center: Vec3A, radius: f32, material: Arc<dyn Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let oc = self.center - ray.origin;

        // Quadratic in half-b form to avoid catastrophic cancellation.
        let a = ray.direction.length_squared();
        let h = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        // Prefer the nearer root; fall back to the far one.
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let point = ray.at(root);
        let outward_normal = (point - self.center) / self.radius;
        Some(HitRecord::new(
            ray,
            root,
            point,
            outward_normal,
            self.material.clone(),
        ))
    }
}
