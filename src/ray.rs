use glam::Vec3A;

/// A ray of light, parametrized as `origin + t * direction`.
///
/// The direction is not required to be unit length; code that needs a unit
/// vector normalizes on its own.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ray {
    pub origin: Vec3A,
    pub direction: Vec3A,
}

impl Ray {
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self { origin, direction }
    }

    /// The point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }
}
