use crate::{
    hittable::{HitRecord, Hittable},
    interval::Interval,
    material::Material,
    ray::Ray,
};
use glam::Vec3A;
use std::sync::Arc;

/// Rays closer to parallel than this are treated as not intersecting.
const PARALLEL_EPSILON: f32 = 1e-6;

/// An infinite plane through a point with a given normal.
#[derive(Clone, Debug)]
pub struct Plane {
    point: Vec3A,
    normal: Vec3A,
    material: Arc<dyn Material>,
}

impl Plane {
    pub fn new(point: Vec3A, normal: Vec3A, material: Arc<dyn Material>) -> Self {
        Self {
            point,
            normal: normal.normalize(),
            material,
        }
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let denom = self.normal.dot(ray.direction);

        // Near-parallel rays would blow up the division below.
        if denom.abs() <= PARALLEL_EPSILON {
            return None;
        }

        let t = (self.point - ray.origin).dot(self.normal) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        Some(HitRecord::new(
            ray,
            t,
            ray.at(t),
            self.normal,
            self.material.clone(),
        ))
    }
}
