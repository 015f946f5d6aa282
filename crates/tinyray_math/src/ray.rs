use crate::{Point3, Vec3};

/// Half-line `origin + t * direction`.
///
/// `direction` is not normalized, so `t` counts multiples of its length.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3,
}

impl Ray {
    #[inline]
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Point reached at parameter `t`.
    #[inline]
    pub fn at(&self, t: f32) -> Point3 {
        self.origin + self.direction * t
    }
}

impl Default for Ray {
    /// Down the camera's default view axis.
    fn default() -> Self {
        Self::new(Point3::ZERO, Vec3::NEG_Z)
    }
}
