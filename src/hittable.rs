use crate::{interval::Interval, material::Material, ray::Ray};
use glam::Vec3A;
use std::sync::Arc;

/// The record of a successful intersection test.
///
/// Stack-scoped; produced fresh per test and never persisted. The material is
/// a shared reference to whatever material the hit primitive carries.
#[derive(Clone, Debug)]
pub struct HitRecord {
    pub point: Vec3A,
    /// Unit normal at the hit point, oriented against the incoming ray.
    pub normal: Vec3A,
    pub t: f32,
    /// True if the ray entered from outside, i.e. the outward surface normal
    /// already pointed against the ray.
    pub front_face: bool,
    pub material: Arc<dyn Material>,
}

impl HitRecord {
    /// Builds a record from the outward surface normal, flipping it so the
    /// stored normal always opposes the ray direction.
    pub fn new(
        ray: &Ray,
        t: f32,
        point: Vec3A,
        outward_normal: Vec3A,
        material: Arc<dyn Material>,
    ) -> Self {
        let front_face = ray.direction.dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            point,
            normal,
            t,
            front_face,
            material,
        }
    }
}

/// Anything a ray can intersect within a parametric interval.
///
/// Implementors must only report a hit whose parameter lies strictly inside
/// `ray_t`, and must populate every field of the returned record.
pub trait Hittable: Send + Sync {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord>;
}
