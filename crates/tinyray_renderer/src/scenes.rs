//! Built-in scenes, each paired with a camera that frames it.

use crate::{Camera, Color, HittableList, Material, Point3, Sphere, Vec3};
use rand::RngCore;
use std::sync::Arc;
use tinyray_math::random::{random_f32, random_range, random_vec3, random_vec3_range};

/// Ground plus a diffuse, a hollow glass and a metal sphere in a row.
pub fn three_spheres() -> (Camera, HittableList) {
    let ground = Arc::new(Material::lambertian(Color::new(0.8, 0.8, 0.0)));
    let center = Arc::new(Material::lambertian(Color::new(0.1, 0.2, 0.5)));
    let glass = Arc::new(Material::dielectric(1.5));
    let bubble = Arc::new(Material::dielectric(1.0 / 1.5));
    let gold = Arc::new(Material::metal(Color::new(0.8, 0.6, 0.2), 1.0));

    let mut world = HittableList::new();
    world.add(Box::new(Sphere::new(Point3::new(0.0, -100.5, -1.0), 100.0, ground)));
    world.add(Box::new(Sphere::new(Point3::new(0.0, 0.0, -1.2), 0.5, center)));
    world.add(Box::new(Sphere::new(Point3::new(-1.0, 0.0, -1.0), 0.5, glass)));
    world.add(Box::new(Sphere::new(Point3::new(-1.0, 0.0, -1.0), 0.4, bubble)));
    world.add(Box::new(Sphere::new(Point3::new(1.0, 0.0, -1.0), 0.5, gold)));

    let camera = Camera::new()
        .with_quality(50, 20)
        .with_position(
            Point3::new(-2.0, 2.0, 1.0),
            Point3::new(0.0, 0.0, -1.0),
            Vec3::Y,
        )
        .with_lens(20.0, 10.0, 3.4);

    (camera, world)
}

/// The classic cover scene: three large spheres on a field of small random ones.
///
/// Small spheres draw from a shared palette, so many of them point at the same
/// material instance.
pub fn random_spheres(rng: &mut dyn RngCore) -> (Camera, HittableList) {
    let palette = build_palette(rng);
    random_spheres_from_palette(rng, &palette)
}

fn random_spheres_from_palette(
    rng: &mut dyn RngCore,
    palette: &[Arc<Material>],
) -> (Camera, HittableList) {
    let mut world = HittableList::new();

    let ground = Arc::new(Material::lambertian(Color::new(0.5, 0.5, 0.5)));
    world.add(Box::new(Sphere::new(Point3::new(0.0, -1000.0, 0.0), 1000.0, ground)));

    let glass = Arc::new(Material::dielectric(1.5));

    for a in -11..11 {
        for b in -11..11 {
            let center = Point3::new(
                a as f32 + 0.9 * random_f32(rng),
                0.2,
                b as f32 + 0.9 * random_f32(rng),
            );

            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let choose_mat = random_f32(rng);
            let material = if choose_mat < 0.95 {
                let index = (random_f32(rng) * palette.len() as f32) as usize;
                palette[index.min(palette.len() - 1)].clone()
            } else {
                glass.clone()
            };
            world.add(Box::new(Sphere::new(center, 0.2, material)));
        }
    }

    world.add(Box::new(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, glass)));
    world.add(Box::new(Sphere::new(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Material::lambertian(Color::new(0.4, 0.2, 0.1)),
    )));
    world.add(Box::new(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Material::metal(Color::new(0.7, 0.6, 0.5), 0.0),
    )));

    log::debug!("Random scene built with {} spheres", world.len());

    let camera = Camera::new()
        .with_quality(10, 10)
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.6, 10.0);

    (camera, world)
}

/// Sixteen diffuse and four metal materials. Small spheres draw from it 95% of
/// the time, so about 76% of them end up diffuse, 19% metal and 5% glass.
fn build_palette(rng: &mut dyn RngCore) -> Vec<Arc<Material>> {
    let mut palette = Vec::with_capacity(20);
    for _ in 0..16 {
        let albedo = random_vec3(rng) * random_vec3(rng);
        palette.push(Arc::new(Material::lambertian(albedo)));
    }
    for _ in 0..4 {
        let albedo = random_vec3_range(rng, 0.5, 1.0);
        let fuzz = random_range(rng, 0.0, 0.5);
        palette.push(Arc::new(Material::metal(albedo, fuzz)));
    }
    palette
}
