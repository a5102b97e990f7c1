use crate::{
    hittable::{HitRecord, Hittable},
    interval::Interval,
    ray::Ray,
};
use std::sync::Arc;

/// An ordered collection of shared primitives, itself a `Hittable`.
///
/// Built once before rendering and read-only afterwards, which is what makes
/// sharing it by reference across render workers safe.
#[derive(Default)]
pub struct Scene {
    objects: Vec<Arc<dyn Hittable>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.objects.push(object);
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for Scene {
    /// Tests every object against a shrinking `[t_min, closest_so_far]`
    /// interval, keeping the closest valid hit.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest_so_far = ray_t.max;
        let mut closest_hit = None;

        for object in &self.objects {
            if let Some(hit) = object.hit(ray, Interval::new(ray_t.min, closest_so_far)) {
                closest_so_far = hit.t;
                closest_hit = Some(hit);
            }
        }

        closest_hit
    }
}
