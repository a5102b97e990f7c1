use crate::{
    color::write_pixel,
    hittable::Hittable,
    interval::Interval,
    ray::Ray,
    sampling::{random_in_unit_disk, sample_square},
    DefaultRng,
};
use glam::{vec3a, Vec3A};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::SeedableRng;
use rayon::prelude::*;
use std::ops::Range;

/// Lower bound of every shading interval, excluding self-intersection at the
/// ray's own origin.
const SHADOW_ACNE_EPSILON: f32 = 0.001;

/// Camera configuration and render orchestration.
///
/// All fields are plain configuration; the derived viewport state is
/// recomputed at the start of every [`render`](Camera::render) call.
#[derive(Clone, Debug)]
pub struct Camera {
    /// Ratio of image width over height.
    pub aspect_ratio: f32,
    /// Rendered image width in pixel count.
    pub image_width: u32,
    /// Count of random samples for each pixel.
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces into the scene.
    pub max_depth: u32,
    /// Vertical view angle (field of view) in degrees.
    pub vfov: f32,
    /// Point the camera is looking from.
    pub lookfrom: Vec3A,
    /// Point the camera is looking at.
    pub lookat: Vec3A,
    /// Camera-relative "up" direction.
    pub vup: Vec3A,
    /// Variation angle of rays through each pixel, in degrees.
    pub defocus_angle: f32,
    /// Distance from lookfrom to the plane of perfect focus.
    pub focus_dist: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            lookfrom: Vec3A::ZERO,
            lookat: vec3a(0.0, 0.0, -1.0),
            vup: vec3a(0.0, 1.0, 0.0),
            defocus_angle: 0.0,
            focus_dist: 10.0,
        }
    }
}

/// Viewport state derived from a `Camera`, valid for one render call.
struct Viewport {
    image_width: u32,
    image_height: u32,
    pixel_samples_scale: f32,
    center: Vec3A,
    pixel00_loc: Vec3A,
    pixel_delta_u: Vec3A,
    pixel_delta_v: Vec3A,
    defocus_angle: f32,
    defocus_disk_u: Vec3A,
    defocus_disk_v: Vec3A,
}

impl Viewport {
    /// A ray from the defocus disk (or the camera center) through a jittered
    /// point around pixel `(i, j)`.
    fn get_ray(&self, i: u32, j: u32, rng: &mut DefaultRng) -> Ray {
        let offset = sample_square(rng);
        let pixel_sample = self.pixel00_loc
            + (i as f32 + offset.x) * self.pixel_delta_u
            + (j as f32 + offset.y) * self.pixel_delta_v;

        let origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(origin, pixel_sample - origin)
    }

    fn defocus_disk_sample(&self, rng: &mut DefaultRng) -> Vec3A {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }
}

impl Camera {
    /// Image height derived from width and aspect ratio, clamped to at
    /// least one row.
    pub fn image_height(&self) -> u32 {
        ((self.image_width as f32 / self.aspect_ratio) as u32).max(1)
    }

    fn viewport(&self) -> Viewport {
        let image_height = self.image_height();
        let center = self.lookfrom;

        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width = viewport_height * (self.image_width as f32 / image_height as f32);

        // Orthonormal camera frame basis.
        let w = (self.lookfrom - self.lookat).normalize();
        let u = self.vup.cross(w).normalize();
        let v = w.cross(u);

        // Vectors across the horizontal and down the vertical viewport edges.
        let viewport_u = viewport_width * u;
        let viewport_v = viewport_height * -v;

        let pixel_delta_u = viewport_u / self.image_width as f32;
        let pixel_delta_v = viewport_v / image_height as f32;

        let viewport_upper_left =
            center - self.focus_dist * w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        let defocus_radius = self.focus_dist * (self.defocus_angle / 2.0).to_radians().tan();

        Viewport {
            image_width: self.image_width,
            image_height,
            pixel_samples_scale: 1.0 / self.samples_per_pixel as f32,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            defocus_angle: self.defocus_angle,
            defocus_disk_u: u * defocus_radius,
            defocus_disk_v: v * defocus_radius,
        }
    }

    /// Renders the scene into a flat row-major RGB byte buffer.
    ///
    /// Scanlines are split into contiguous row ranges, one per worker. Each
    /// worker owns its band of the buffer exclusively and an independently
    /// seeded rng, so no locking is needed anywhere in the pixel loop. The
    /// call blocks until every worker has finished.
    pub fn render(&self, world: &dyn Hittable) -> Vec<u8> {
        let viewport = self.viewport();
        let row_stride = viewport.image_width as usize * 3;
        let mut pixels = vec![0u8; row_stride * viewport.image_height as usize];

        let ranges = partition_rows(viewport.image_height, worker_count());
        info!(
            "rendering {}x{} at {} spp on {} threads",
            viewport.image_width,
            viewport.image_height,
            self.samples_per_pixel,
            ranges.len()
        );

        let progress = ProgressBar::new(viewport.image_height as u64);
        progress.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} rows ETA: {eta}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        let start = std::time::Instant::now();

        // Split the buffer into per-worker bands up front; disjointness of
        // the row ranges is what makes the unsynchronized writes sound.
        let mut bands = Vec::with_capacity(ranges.len());
        let mut rest = pixels.as_mut_slice();
        for rows in ranges {
            let tail = std::mem::take(&mut rest);
            let (band, tail) = tail.split_at_mut(rows.len() * row_stride);
            bands.push((rows, band));
            rest = tail;
        }

        bands.into_par_iter().for_each(|(rows, band)| {
            let mut rng = DefaultRng::from_entropy();

            for (j, row) in rows.zip(band.chunks_mut(row_stride)) {
                for (i, pixel) in row.chunks_mut(3).enumerate() {
                    let mut color = Vec3A::ZERO;
                    for _ in 0..self.samples_per_pixel {
                        let ray = viewport.get_ray(i as u32, j, &mut rng);
                        color += ray_color(&ray, self.max_depth, world, &mut rng);
                    }
                    write_pixel(pixel, viewport.pixel_samples_scale * color);
                }
                progress.inc(1);
            }
        });

        progress.finish_and_clear();
        info!("render done in {:.2?}", start.elapsed());

        pixels
    }
}

/// The color carried by a ray, following up to `depth` scattering events.
///
/// A depth of zero returns black: bounce chains that never terminate lose all
/// their energy. A miss returns the vertical sky gradient.
pub fn ray_color(ray: &Ray, depth: u32, world: &dyn Hittable, rng: &mut DefaultRng) -> Vec3A {
    if depth == 0 {
        return Vec3A::ZERO;
    }

    if let Some(hit) = world.hit(ray, Interval::new(SHADOW_ACNE_EPSILON, f32::INFINITY)) {
        return match hit.material.scatter(ray, &hit, rng) {
            Some(scatter) => {
                scatter.attenuation * ray_color(&scatter.scattered, depth - 1, world, rng)
            }
            None => Vec3A::ZERO,
        };
    }

    let unit_direction = ray.direction.normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    (1.0 - a) * Vec3A::ONE + a * vec3a(0.5, 0.7, 1.0)
}

/// Number of render workers: available hardware parallelism with a floor
/// of one.
pub fn worker_count() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
}

/// Partitions the image rows `[0, height)` into contiguous ranges, one per
/// worker.
///
/// Floor-division chunks, with the last range absorbing the remainder; the
/// worker count is capped by the row count so no range is empty. The union of
/// the ranges covers every row exactly once.
pub fn partition_rows(height: u32, workers: usize) -> Vec<Range<u32>> {
    let workers = workers.clamp(1, height.max(1) as usize) as u32;
    let chunk_size = height / workers;

    (0..workers)
        .map(|t| {
            let start = t * chunk_size;
            let end = if t == workers - 1 {
                height
            } else {
                start + chunk_size
            };
            start..end
        })
        .collect()
}
