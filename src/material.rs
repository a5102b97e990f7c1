use crate::{hittable::HitRecord, ray::Ray, sampling::random_unit_vector, DefaultRng};
use glam::Vec3A;
use rand::Rng;

/// Reflect vector `v` around normal `n`.
pub fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    v - 2.0 * v.dot(n) * n
}

/// Refract unit vector `uv` through a surface with normal `n` and relative
/// refraction index `etai_over_etat`.
pub fn refract(uv: Vec3A, n: Vec3A, etai_over_etat: f32) -> Vec3A {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Schlick's approximation for reflectance.
pub fn reflectance(cosine: f32, refraction_index: f32) -> f32 {
    let r0 = (1.0 - refraction_index) / (1.0 + refraction_index);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// One scattering event: the fraction of light preserved and the new ray.
#[derive(Clone, Copy, Debug)]
pub struct ScatterResult {
    pub attenuation: Vec3A,
    pub scattered: Ray,
}

/// Decides whether and how light scatters at a surface hit.
///
/// Materials are immutable and stateless, so one instance can be shared by
/// many primitives and invoked concurrently from every worker. `None` means
/// the ray is absorbed and contributes nothing further.
pub trait Material: Send + Sync + std::fmt::Debug {
    fn scatter(&self, ray: &Ray, hit: &HitRecord, rng: &mut DefaultRng) -> Option<ScatterResult>;
}

/// Diffuse surface scattering in a cosine-weighted distribution around the
/// normal.
#[derive(Clone, Debug)]
pub struct Lambertian {
    pub albedo: Vec3A,
}

impl Lambertian {
    pub fn new(albedo: Vec3A) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(&self, _ray: &Ray, hit: &HitRecord, rng: &mut DefaultRng) -> Option<ScatterResult> {
        let mut direction = hit.normal + random_unit_vector(rng);

        // Catch degenerate scatter directions.
        if direction.length_squared() < 1e-8 {
            direction = hit.normal;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(hit.point, direction),
        })
    }
}

/// Specular reflection, optionally fuzzed into a cone.
#[derive(Clone, Debug)]
pub struct Metal {
    pub albedo: Vec3A,
    pub fuzz: f32,
}

impl Metal {
    pub fn new(albedo: Vec3A, fuzz: f32) -> Self {
        Self { albedo, fuzz }
    }
}

impl Material for Metal {
    fn scatter(&self, ray: &Ray, hit: &HitRecord, rng: &mut DefaultRng) -> Option<ScatterResult> {
        let reflected = reflect(ray.direction, hit.normal).normalize()
            + self.fuzz * random_unit_vector(rng);

        // A fuzzed reflection that points into the surface is absorbed.
        if reflected.dot(hit.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered: Ray::new(hit.point, reflected),
            })
        } else {
            None
        }
    }
}

/// Clear refractive material such as glass or water.
#[derive(Clone, Debug)]
pub struct Dielectric {
    pub refraction_index: f32,
}

impl Dielectric {
    pub fn new(refraction_index: f32) -> Self {
        Self { refraction_index }
    }
}

impl Material for Dielectric {
    fn scatter(&self, ray: &Ray, hit: &HitRecord, rng: &mut DefaultRng) -> Option<ScatterResult> {
        let ri = if hit.front_face {
            1.0 / self.refraction_index
        } else {
            self.refraction_index
        };

        let unit_direction = ray.direction.normalize();
        let cos_theta = (-unit_direction).dot(hit.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Total internal reflection, or a Schlick draw that favors
        // reflection.
        let cannot_refract = ri * sin_theta > 1.0;
        let direction = if cannot_refract || reflectance(cos_theta, ri) > rng.gen::<f32>() {
            reflect(unit_direction, hit.normal)
        } else {
            refract(unit_direction, hit.normal, ri)
        };

        Some(ScatterResult {
            // The medium is assumed non-absorbing.
            attenuation: Vec3A::ONE,
            scattered: Ray::new(hit.point, direction),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec3a;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn head_on_hit(material: Arc<dyn Material>) -> (Ray, HitRecord) {
        let ray = Ray::new(vec3a(0.0, 1.0, 0.0), vec3a(0.0, -1.0, 0.0));
        let hit = HitRecord::new(&ray, 1.0, Vec3A::ZERO, vec3a(0.0, 1.0, 0.0), material);
        (ray, hit)
    }

    #[test]
    fn lambertian_always_scatters() {
        let material = Arc::new(Lambertian::new(vec3a(0.3, 0.5, 0.7)));
        let (ray, hit) = head_on_hit(material.clone());
        let mut rng = DefaultRng::seed_from_u64(1);

        for _ in 0..100 {
            let result = material.scatter(&ray, &hit, &mut rng).unwrap();
            assert_eq!(result.attenuation, vec3a(0.3, 0.5, 0.7));
            // Cosine-weighted diffuse never scatters into the surface.
            assert!(result.scattered.direction.dot(hit.normal) >= 0.0);
        }
    }

    #[test]
    fn polished_metal_reflects_exactly() {
        let material = Arc::new(Metal::new(vec3a(0.9, 0.9, 0.9), 0.0));
        let ray = Ray::new(vec3a(-1.0, 1.0, 0.0), vec3a(1.0, -1.0, 0.0));
        let hit = HitRecord::new(&ray, 1.0, Vec3A::ZERO, vec3a(0.0, 1.0, 0.0), material.clone());
        let mut rng = DefaultRng::seed_from_u64(1);

        let result = material.scatter(&ray, &hit, &mut rng).unwrap();
        let expected = vec3a(1.0, 1.0, 0.0).normalize();
        assert!((result.scattered.direction - expected).length() < 1e-6);
    }

    #[test]
    fn fuzzed_grazing_reflection_is_sometimes_absorbed() {
        let material = Arc::new(Metal::new(Vec3A::ONE, 1.0));
        // Grazing incidence: the mirror reflection barely clears the surface,
        // so a unit fuzz offset pushes roughly half the samples into it.
        let ray = Ray::new(vec3a(-1.0, 0.01, 0.0), vec3a(1.0, -0.01, 0.0));
        let hit = HitRecord::new(&ray, 1.0, Vec3A::ZERO, vec3a(0.0, 1.0, 0.0), material.clone());
        let mut rng = DefaultRng::seed_from_u64(1);

        let mut absorbed = 0;
        for _ in 0..200 {
            match material.scatter(&ray, &hit, &mut rng) {
                Some(result) => {
                    assert!(result.scattered.direction.dot(hit.normal) > 0.0);
                }
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn dielectric_always_scatters_without_attenuation() {
        let material = Arc::new(Dielectric::new(1.5));
        let (ray, hit) = head_on_hit(material.clone());
        let mut rng = DefaultRng::seed_from_u64(1);

        for _ in 0..100 {
            let result = material.scatter(&ray, &hit, &mut rng).unwrap();
            assert_eq!(result.attenuation, Vec3A::ONE);
        }
    }

    #[test]
    fn schlick_reflectance_endpoints() {
        // Normal incidence on glass reflects about 4 percent.
        assert!((reflectance(1.0, 1.5) - 0.04).abs() < 1e-3);
        // Grazing incidence reflects everything.
        assert!((reflectance(0.0, 1.5) - 1.0).abs() < 1e-6);
    }
}
