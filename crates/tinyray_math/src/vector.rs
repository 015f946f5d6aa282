//! Vector helpers glam does not provide directly.

use crate::Vec3;

/// Components smaller than this in magnitude count as zero.
const NEAR_ZERO_EPSILON: f32 = 1e-8;

/// Extra operations on [`Vec3`] used by the scattering code.
pub trait Vec3Ext {
    /// Unit vector in the same direction.
    ///
    /// A zero-length vector maps to the zero vector rather than NaN.
    fn unit_vector(self) -> Vec3;

    /// True if every component is within `1e-8` of zero.
    fn near_zero(&self) -> bool;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn unit_vector(self) -> Vec3 {
        self.normalize_or_zero()
    }

    #[inline]
    fn near_zero(&self) -> bool {
        self.x.abs() < NEAR_ZERO_EPSILON
            && self.y.abs() < NEAR_ZERO_EPSILON
            && self.z.abs() < NEAR_ZERO_EPSILON
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with normal `n`.
///
/// `etai_over_etat` is the ratio of refractive indices (incident over transmitted).
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
