//! Random direction and offset sampling for scattering and the camera.
//!
//! Every function takes the caller's rng so workers can keep independent
//! generator state instead of contending on a shared one.

use crate::DefaultRng;
use glam::{vec3a, Vec3A};
use rand::Rng;
use rand_distr::{Distribution, UnitDisc, UnitSphere};

/// A uniformly distributed point on the unit sphere.
pub fn random_unit_vector(rng: &mut DefaultRng) -> Vec3A {
    Vec3A::from(UnitSphere.sample(rng))
}

/// A uniformly distributed point in the unit disk on the xy plane.
pub fn random_in_unit_disk(rng: &mut DefaultRng) -> Vec3A {
    let [x, y]: [f32; 2] = UnitDisc.sample(rng);
    vec3a(x, y, 0.0)
}

/// A uniform offset in the `[-0.5, 0.5]²` pixel square, for box-filter
/// anti-aliasing.
pub fn sample_square(rng: &mut DefaultRng) -> Vec3A {
    vec3a(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5, 0.0)
}
