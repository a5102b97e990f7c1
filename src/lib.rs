//! A multithreaded stochastic path tracer.
//!
//! Scenes are built from shared [`Hittable`](hittable::Hittable) primitives
//! carrying shared [`Material`](material::Material)s, and rendered by a
//! [`Camera`](camera::Camera) into a flat row-major RGB byte buffer.

pub mod camera;
pub mod color;
pub mod hittable;
pub mod interval;
pub mod material;
pub mod output;
pub mod primitives;
pub mod ray;
pub mod sampling;
pub mod scene;

/// The rng used by every render worker and scatter call.
pub type DefaultRng = rand_xoshiro::Xoshiro256Plus;
