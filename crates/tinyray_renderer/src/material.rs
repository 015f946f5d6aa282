//! Surface scattering models.
//!
//! Materials form a closed set, so they are an enum rather than a trait object;
//! `scatter` dispatches with a single `match`.

use crate::{hittable::HitRecord, Color, Ray};
use rand::RngCore;
use tinyray_math::random::{random_f32, random_in_unit_sphere, random_unit_vector};
use tinyray_math::{reflect, refract, Vec3Ext};

/// Outcome of a ray scattering off a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    /// Per-channel factor applied to the light carried by `scattered`
    pub attenuation: Color,
    /// The outgoing ray
    pub scattered: Ray,
}

/// How light interacts with a surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
}

impl Material {
    /// Diffuse material with the given albedo.
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian(Lambertian::new(albedo))
    }

    /// Reflective material; `fuzz` is clamped to [0, 1].
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Material::Metal(Metal::new(albedo, fuzz))
    }

    /// Clear refractive material such as glass or water.
    pub fn dielectric(refraction_index: f32) -> Self {
        Material::Dielectric(Dielectric::new(refraction_index))
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `None` when the ray is absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match self {
            Material::Lambertian(m) => m.scatter(rec, rng),
            Material::Metal(m) => m.scatter(ray_in, rec, rng),
            Material::Dielectric(m) => m.scatter(ray_in, rec, rng),
        }
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub const fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    fn scatter(&self, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if scatter_direction.near_zero() {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scatter_direction),
        })
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }

    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().unit_vector(), rec.normal);
        let direction = reflected + self.fuzz * random_in_unit_sphere(rng);

        // Fuzz can push the ray below the surface; treat that as absorbed
        if direction.dot(rec.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered: Ray::new(rec.p, direction),
            })
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dielectric {
    /// Index of refraction relative to the surrounding medium
    refraction_index: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `refraction_index`: 1.0 = air, 1.33 = water, 1.5 = glass, 2.4 = diamond
    pub fn new(refraction_index: f32) -> Self {
        Self { refraction_index }
    }

    pub fn refraction_index(&self) -> f32 {
        self.refraction_index
    }

    /// Schlick's approximation for reflectance
    fn reflectance(cosine: f32, refraction_index: f32) -> f32 {
        let r0 = ((1.0 - refraction_index) / (1.0 + refraction_index)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }

    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face {
            1.0 / self.refraction_index
        } else {
            self.refraction_index
        };

        let unit_direction = ray_in.direction().unit_vector();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        let cannot_refract = refraction_ratio * sin_theta > 1.0;
        // A matched index has no interface to reflect from
        let index_matched = self.refraction_index == 1.0;

        let direction = if cannot_refract
            || (!index_matched
                && Self::reflectance(cos_theta, refraction_ratio) > random_f32(rng))
        {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Hittable, Sphere, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;
    use tinyray_math::Interval;

    /// Replays a fixed list of words, so float draws are exact.
    struct ScriptedRng {
        words: Vec<u32>,
        next: usize,
    }

    impl ScriptedRng {
        fn new(words: &[u32]) -> Self {
            Self {
                words: words.to_vec(),
                next: 0,
            }
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            let word = self.words[self.next % self.words.len()];
            self.next += 1;
            word
        }

        fn next_u64(&mut self) -> u64 {
            ((self.next_u32() as u64) << 32) | self.next_u32() as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(4) {
                let bytes = self.next_u32().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    fn record(material: &Material, normal: Vec3, front_face: bool) -> HitRecord<'_> {
        HitRecord {
            p: Vec3::ZERO,
            normal,
            material,
            t: 1.0,
            front_face,
        }
    }

    #[test]
    fn test_lambertian_attenuation_is_albedo() {
        let albedo = Color::new(0.8, 0.3, 0.1);
        let material = Material::lambertian(albedo);
        let rec = record(&material, Vec3::Y, true);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1000 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(result.attenuation, albedo);
            assert_eq!(result.scattered.origin(), rec.p);
            assert!(!result.scattered.direction().near_zero());
        }
    }

    #[test]
    fn test_lambertian_degenerate_direction_falls_back_to_normal() {
        // Draws 0.5, 0.5, 0.25 -> in-sphere point (0, 0, -0.5) -> unit vector -Z,
        // which cancels the +Z normal exactly
        let mut rng = ScriptedRng::new(&[0x8000_0000, 0x8000_0000, 0x4000_0000]);
        let material = Material::lambertian(Color::splat(0.5));
        let rec = record(&material, Vec3::Z, true);
        let ray = Ray::new(Vec3::Z, Vec3::NEG_Z);

        let result = material.scatter(&ray, &rec, &mut rng).unwrap();
        assert_eq!(result.scattered.direction(), Vec3::Z);
    }

    #[test]
    fn test_metal_without_fuzz_is_a_mirror() {
        let metal = Arc::new(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0));
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, metal.clone());
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -3.0));
        let mut rec = HitRecord::default();
        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));

        let mut rng = StdRng::seed_from_u64(9);
        let result = rec.material.scatter(&ray, &rec, &mut rng).unwrap();
        let expected = reflect(ray.direction().unit_vector(), rec.normal);
        assert_eq!(result.scattered.direction(), expected);
        assert!((result.scattered.direction() - Vec3::Z).length() < 1e-5);
        assert_eq!(result.attenuation, Color::new(0.7, 0.6, 0.5));
    }

    #[test]
    fn test_metal_absorbs_rays_reflected_into_the_surface() {
        let material = Material::metal(Color::ONE, 0.0);
        // Incoming ray travels along the normal, so its mirror image points inward
        let rec = record(&material, Vec3::Y, true);
        let ray = Ray::new(Vec3::NEG_Y, Vec3::Y);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(material.scatter(&ray, &rec, &mut rng).is_none());
    }

    #[test]
    fn test_metal_fuzz_is_clamped() {
        assert_eq!(Metal::new(Color::ONE, 3.0).fuzz(), 1.0);
        assert_eq!(Metal::new(Color::ONE, -1.0).fuzz(), 0.0);
    }

    #[test]
    fn test_dielectric_matched_index_passes_straight_through() {
        let material = Material::dielectric(1.0);
        let mut rng = StdRng::seed_from_u64(5);
        let directions = [
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(3.0, -0.2, 1.0),
        ];

        for front_face in [true, false] {
            let rec = record(&material, Vec3::Y, front_face);
            for direction in directions {
                let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), direction);
                for _ in 0..100 {
                    let result = material.scatter(&ray, &rec, &mut rng).unwrap();
                    let out = result.scattered.direction();
                    assert!((out - direction.normalize()).length() < 1e-5);
                    assert_eq!(result.attenuation, Color::ONE);
                }
            }
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let material = Material::dielectric(1.5);
        // Leaving glass at a grazing angle: 1.5 * sin(theta) > 1
        let rec = record(&material, Vec3::Y, false);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, -0.2, 0.0));
        let mut rng = StdRng::seed_from_u64(8);

        for _ in 0..100 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            let out = result.scattered.direction();
            assert!(out.y > 0.0);
            assert!((out - reflect(ray.direction().normalize(), Vec3::Y)).length() < 1e-6);
        }
    }

    #[test]
    fn test_dielectric_never_absorbs() {
        let material = Material::dielectric(1.5);
        let rec = record(&material, Vec3::Y, true);
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..1000 {
            assert!(material.scatter(&ray, &rec, &mut rng).is_some());
        }
    }

    #[test]
    fn test_reflectance_at_normal_incidence() {
        // ((1 - 1.5) / (1 + 1.5))^2 = 0.04
        assert!((Dielectric::reflectance(1.0, 1.5) - 0.04).abs() < 1e-6);
        assert!((Dielectric::reflectance(1.0, 1.0 / 1.5) - 0.04).abs() < 1e-6);
        assert!((Dielectric::reflectance(0.0, 1.5) - 1.0).abs() < 1e-6);
    }
}
