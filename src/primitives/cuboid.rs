use crate::{
    hittable::{HitRecord, Hittable},
    interval::Interval,
    material::Material,
    ray::Ray,
};
use glam::Vec3A;
use std::sync::Arc;

/// An axis-aligned box given by its min and max corners.
#[derive(Clone, Debug)]
pub struct Cuboid {
    min: Vec3A,
    max: Vec3A,
    material: Arc<dyn Material>,
}

impl Cuboid {
    /// The corners may be given in any order; they are normalized
    /// component-wise.
    pub fn new(a: Vec3A, b: Vec3A, material: Arc<dyn Material>) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            material,
        }
    }

    /// Outward normal of the face nearest to `point`.
    ///
    /// At edges and corners several faces are equidistant; the tie breaks in
    /// fixed x, y, z scan order, min face before max face per axis.
    fn face_normal(&self, point: Vec3A) -> Vec3A {
        let mut best_axis = 0;
        let mut best_sign = -1.0;
        let mut best_dist = f32::INFINITY;

        for axis in 0..3 {
            let to_min = (point[axis] - self.min[axis]).abs();
            if to_min < best_dist {
                best_dist = to_min;
                best_axis = axis;
                best_sign = -1.0;
            }
            let to_max = (point[axis] - self.max[axis]).abs();
            if to_max < best_dist {
                best_dist = to_max;
                best_axis = axis;
                best_sign = 1.0;
            }
        }

        let mut normal = Vec3A::ZERO;
        normal[best_axis] = best_sign;
        normal
    }
}

impl Hittable for Cuboid {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        // Slab test: intersect the running interval with each axis's pair of
        // bounding planes. It only ever narrows.
        let mut t_range = ray_t;
        for axis in 0..3 {
            let inv_d = 1.0 / ray.direction[axis];
            let mut t0 = (self.min[axis] - ray.origin[axis]) * inv_d;
            let mut t1 = (self.max[axis] - ray.origin[axis]) * inv_d;
            if inv_d < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_range.min = t_range.min.max(t0);
            t_range.max = t_range.max.min(t1);
            if t_range.max <= t_range.min {
                return None;
            }
        }

        let t = t_range.min;
        let point = ray.at(t);
        Some(HitRecord::new(
            ray,
            t,
            point,
            self.face_normal(point),
            self.material.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use glam::vec3a;

    fn unit_cube() -> Cuboid {
        Cuboid::new(
            vec3a(-0.5, -0.5, -0.5),
            vec3a(0.5, 0.5, 0.5),
            Arc::new(Lambertian::new(Vec3A::ONE)),
        )
    }

    fn hit(cuboid: &Cuboid, origin: Vec3A, direction: Vec3A) -> Option<HitRecord> {
        let ray = Ray::new(origin, direction);
        cuboid.hit(&ray, Interval::new(0.001, f32::INFINITY))
    }

    #[test]
    fn each_face_reports_its_axis_normal() {
        let cuboid = unit_cube();
        let cases = [
            (vec3a(2.0, 0.0, 0.0), vec3a(-1.0, 0.0, 0.0), vec3a(1.0, 0.0, 0.0)),
            (vec3a(-2.0, 0.0, 0.0), vec3a(1.0, 0.0, 0.0), vec3a(-1.0, 0.0, 0.0)),
            (vec3a(0.0, 2.0, 0.0), vec3a(0.0, -1.0, 0.0), vec3a(0.0, 1.0, 0.0)),
            (vec3a(0.0, -2.0, 0.0), vec3a(0.0, 1.0, 0.0), vec3a(0.0, -1.0, 0.0)),
            (vec3a(0.0, 0.0, 2.0), vec3a(0.0, 0.0, -1.0), vec3a(0.0, 0.0, 1.0)),
            (vec3a(0.0, 0.0, -2.0), vec3a(0.0, 0.0, 1.0), vec3a(0.0, 0.0, -1.0)),
        ];

        for (origin, direction, expected) in cases {
            let record = hit(&cuboid, origin, direction).unwrap();
            assert_eq!(record.normal, expected);
            assert!(record.front_face);
            assert!((record.t - 1.5).abs() < 1e-5);
        }
    }

    #[test]
    fn edge_hit_breaks_the_tie_on_x() {
        let cuboid = unit_cube();
        // Aimed exactly at the x-max/y-max edge.
        let record = hit(&cuboid, vec3a(2.0, 2.0, 0.0), vec3a(-1.0, -1.0, 0.0)).unwrap();
        assert_eq!(record.normal, vec3a(1.0, 0.0, 0.0));
    }

    #[test]
    fn misses_to_the_side() {
        let cuboid = unit_cube();
        assert!(hit(&cuboid, vec3a(2.0, 1.0, 0.0), vec3a(-1.0, 0.0, 0.0)).is_none());
        assert!(hit(&cuboid, vec3a(2.0, 0.0, 0.0), vec3a(1.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn interval_narrowing_rejects_far_hits() {
        let cuboid = unit_cube();
        let ray = Ray::new(vec3a(2.0, 0.0, 0.0), vec3a(-1.0, 0.0, 0.0));
        assert!(cuboid.hit(&ray, Interval::new(0.001, 1.0)).is_none());
        assert!(cuboid.hit(&ray, Interval::new(0.001, 2.0)).is_some());
    }

    #[test]
    fn corners_may_be_given_in_any_order() {
        let material: Arc<dyn Material> = Arc::new(Lambertian::new(Vec3A::ONE));
        let cuboid = Cuboid::new(vec3a(0.5, 0.5, 0.5), vec3a(-0.5, -0.5, -0.5), material);
        assert!(hit(&cuboid, vec3a(2.0, 0.0, 0.0), vec3a(-1.0, 0.0, 0.0)).is_some());
    }
}
