//! Ray-surface intersection: the `Hittable` seam and the flat scene list.

use crate::{Color, Lambertian, Material, Ray};
use std::fmt;
use tinyray_math::{Interval, Point3, Vec3};

/// Stand-in material for a record that has not been filled by a hit yet.
static PLACEHOLDER_MATERIAL: Material = Material::Lambertian(Lambertian::new(Color::ZERO));

/// Where and how a ray met a surface.
///
/// Borrows the surface's material, so a record never outlives the scene.
#[derive(Debug, Clone)]
pub struct HitRecord<'a> {
    pub p: Point3,
    /// Unit length, facing against the incoming ray
    pub normal: Vec3,
    pub material: &'a Material,
    pub t: f32,
    /// Ray arrived from the outside of the surface
    pub front_face: bool,
}

impl Default for HitRecord<'_> {
    fn default() -> Self {
        Self {
            p: Point3::ZERO,
            normal: Vec3::ZERO,
            material: &PLACEHOLDER_MATERIAL,
            t: 0.0,
            front_face: false,
        }
    }
}

impl HitRecord<'_> {
    /// Orient `outward_normal` (unit length) against the ray and note which side was hit.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        let from_outside = ray.direction().dot(outward_normal) < 0.0;
        self.front_face = from_outside;
        self.normal = if from_outside { outward_normal } else { -outward_normal };
    }
}

/// Anything a ray can intersect.
pub trait Hittable: Send + Sync {
    /// Report the nearest intersection with `t` strictly inside `ray_t`.
    ///
    /// On a hit, fills `rec` and returns true. On a miss `rec` is untouched.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool;
}

/// The scene: every object, tested one after another.
#[derive(Default)]
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(object: Box<dyn Hittable>) -> Self {
        Self {
            objects: vec![object],
        }
    }

    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl fmt::Debug for HittableList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HittableList")
            .field("len", &self.objects.len())
            .finish()
    }
}

impl Extend<Box<dyn Hittable>> for HittableList {
    fn extend<I: IntoIterator<Item = Box<dyn Hittable>>>(&mut self, iter: I) {
        self.objects.extend(iter);
    }
}

impl Hittable for HittableList {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        // Each hit narrows the window, so later objects only win if closer
        let mut window = ray_t;
        let mut found = false;

        for object in &self.objects {
            if object.hit(ray, window, rec) {
                found = true;
                window = window.with_max(rec.t);
            }
        }

        found
    }
}
