use clap::Parser;
use glam::{vec3a, Vec3A};
use log::warn;
use skylight::{
    camera::Camera,
    material::{Lambertian, Material, Metal},
    output::save_png,
    primitives::{Cuboid, Plane, Sphere},
    scene::Scene,
};
use std::{path::PathBuf, sync::Arc};

#[derive(Parser)]
#[command(name = "skylight", about = "A multithreaded stochastic path tracer")]
struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 400)]
    width: u32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value_t = 200)]
    samples_per_pixel: u32,

    /// Maximum number of ray bounces
    #[arg(long, default_value_t = 50)]
    max_depth: u32,

    /// Output file path
    #[arg(long, short, default_value = "image.png")]
    output: PathBuf,
}

/// A polished metal cube flanked by two spheres over a green ground plane.
/// The cube and the far sphere share one metal material.
fn demo_scene() -> Scene {
    let mut world = Scene::new();

    let ground = Arc::new(Lambertian::new(vec3a(0.1, 0.6, 0.1)));
    world.add(Arc::new(Plane::new(
        Vec3A::ZERO,
        vec3a(0.0, 1.0, 0.0),
        ground,
    )));

    let mirror: Arc<dyn Material> = Arc::new(Metal::new(vec3a(0.9, 0.9, 0.9), 0.0));
    world.add(Arc::new(Cuboid::new(
        vec3a(-0.5, -0.5, -0.5),
        vec3a(0.5, 0.5, 0.5),
        mirror.clone(),
    )));
    world.add(Arc::new(Sphere::new(vec3a(-1.5, 0.4, -2.5), 0.3, mirror)));

    let matte = Arc::new(Lambertian::new(vec3a(0.1, 0.2, 0.5)));
    world.add(Arc::new(Sphere::new(vec3a(0.0, 0.9, 0.0), 0.3, matte)));

    world
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let world = demo_scene();

    let camera = Camera {
        aspect_ratio: 16.0 / 9.0,
        image_width: args.width,
        samples_per_pixel: args.samples_per_pixel,
        max_depth: args.max_depth,
        vfov: 20.0,
        lookfrom: vec3a(4.0, 3.0, 3.0),
        lookat: vec3a(0.0, 0.6, 0.0),
        vup: vec3a(0.0, 1.0, 0.0),
        defocus_angle: 1.0,
        focus_dist: 5.0,
    };

    let pixels = camera.render(&world);

    // A failed write is reported but the process still exits normally; the
    // render itself succeeded.
    if let Err(e) = save_png(&pixels, camera.image_width, camera.image_height(), &args.output) {
        warn!("{e:#}");
    }
}
