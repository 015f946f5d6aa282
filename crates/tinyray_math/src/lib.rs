// Re-export glam for convenience
pub use glam::*;

// tinyray math types
mod interval;
mod ray;
mod vector;
pub mod random;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{reflect, refract, Vec3Ext};

/// A point in 3D space.
pub type Point3 = Vec3;
