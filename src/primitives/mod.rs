//! Geometric primitives that all impl Hittable.

mod cuboid;
mod plane;
mod sphere;

pub use cuboid::*;
pub use plane::*;
pub use sphere::*;
