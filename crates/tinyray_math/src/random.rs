//! Random sampling helpers.
//!
//! Every helper takes the generator explicitly so renders are reproducible from a
//! seed. The rejection samplers give up after [`MAX_REJECTION_ATTEMPTS`] draws and
//! return the zero vector (the centre of the sampled region).

use crate::{Vec3, Vec3Ext};
use rand::Rng;

/// Upper bound on draws for the rejection samplers.
pub const MAX_REJECTION_ATTEMPTS: usize = 1024;

/// Random real in [0, 1).
#[inline]
pub fn random_f32<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen::<f32>()
}

/// Random real in [min, max).
#[inline]
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + (max - min) * random_f32(rng)
}

/// Random vector with components in [0, 1).
pub fn random_vec3<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(random_f32(rng), random_f32(rng), random_f32(rng))
}

/// Random vector with components in [min, max).
pub fn random_vec3_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> Vec3 {
    Vec3::new(
        random_range(rng, min, max),
        random_range(rng, min, max),
        random_range(rng, min, max),
    )
}

/// Random point strictly inside the unit sphere.
pub fn random_in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    for _ in 0..MAX_REJECTION_ATTEMPTS {
        let p = random_vec3_range(rng, -1.0, 1.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
    Vec3::ZERO
}

/// Random direction on the unit sphere.
///
/// Zero only if the sphere sampler fell back (or drew the exact centre).
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    random_in_unit_sphere(rng).unit_vector()
}

/// Random point inside the unit disk in the XY plane.
pub fn random_in_unit_disk<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    for _ in 0..MAX_REJECTION_ATTEMPTS {
        let p = Vec3::new(random_range(rng, -1.0, 1.0), random_range(rng, -1.0, 1.0), 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
    Vec3::ZERO
}

/// Random point in the unit sphere, flipped into the hemisphere around `normal`.
pub fn random_on_hemisphere<R: Rng + ?Sized>(rng: &mut R, normal: Vec3) -> Vec3 {
    let in_unit_sphere = random_in_unit_sphere(rng);
    if in_unit_sphere.dot(normal) > 0.0 {
        in_unit_sphere
    } else {
        -in_unit_sphere
    }
}
