//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing bounded by the camera's max depth
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction on output
//!
//! Every path ends in one of three ways: absorbed by a material, out of
//! bounces, or escaped to the sky.

use crate::{encode_color, Camera, Color, HitRecord, Hittable, RasterSink, Ray};
use rand::RngCore;
use std::time::Instant;
use tinyray_math::{Interval, Vec3Ext};

/// Lower bound on hit distance, keeps a scattered ray from re-hitting its origin.
pub const SHADOW_ACNE_EPSILON: f32 = 0.001;

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It traces the ray through
/// the scene, bouncing off surfaces and accumulating attenuation.
pub fn ray_color(ray: &Ray, depth: u32, world: &dyn Hittable, rng: &mut dyn RngCore) -> Color {
    // Out of bounces, no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();

    if !world.hit(ray, Interval::new(SHADOW_ACNE_EPSILON, f32::INFINITY), &mut rec) {
        return sky_gradient(ray);
    }

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, depth - 1, world, rng),
        None => Color::ZERO,
    }
}

/// Vertical white-to-blue gradient used as the background.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().unit_vector();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Render a single pixel with multi-sampling, returning the averaged linear color.
///
/// The camera must already be initialized.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel {
        // Camera.get_ray already adds random offset for anti-aliasing
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, camera.max_depth, world, rng);
    }

    pixel_color * camera.pixel_samples_scale()
}

/// Render the entire scene into a raster sink.
///
/// Rows are rendered top to bottom, pixels left to right, and each pixel is
/// written exactly once. The camera must already be initialized for the sink size;
/// [`Camera::render`] takes care of that.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    sink: &mut dyn RasterSink,
    rng: &mut dyn RngCore,
) {
    let width = sink.width();
    let height = sink.height();
    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        width,
        height,
        camera.samples_per_pixel,
        camera.max_depth
    );
    let start = Instant::now();

    for y in 0..height {
        log::trace!("Scanline {} of {}", y + 1, height);
        for x in 0..width {
            let color = render_pixel(camera, world, x, y, rng);
            sink.set_pixel(x, y, encode_color(color, camera.gamma_correct));
        }
    }

    log::info!("Rendered in {:?}", start.elapsed());
}
