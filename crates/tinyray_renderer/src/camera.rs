//! Thin-lens pinhole camera.

use crate::{renderer, Hittable, RasterSink, Ray};
use rand::RngCore;
use tinyray_math::random::{random_f32, random_in_unit_disk};
use tinyray_math::{Point3, Vec3, Vec3Ext};

/// Viewpoint, lens and sampling settings for a render.
///
/// Public fields are plain knobs. Placement and lens go through the `with_*`
/// builders. Everything below `view` is derived by [`Camera::initialize`], which
/// [`Camera::render`] runs at the start of every pass, so changing a setting
/// between passes is always safe.
#[derive(Debug, Clone)]
pub struct Camera {
    pub samples_per_pixel: u32,
    pub max_depth: u32,
    pub gamma_correct: bool,

    look_from: Point3,
    look_at: Point3,
    vup: Vec3,
    /// Vertical field of view, degrees
    vfov: f32,
    /// Cone angle through each pixel, degrees; 0 is a pinhole
    defocus_angle: f32,
    /// Distance to the plane in perfect focus
    focus_dist: f32,

    view: Viewport,
}

/// Per-pass values derived from the camera settings and the raster size.
#[derive(Debug, Clone, Copy, Default)]
struct Viewport {
    eye: Point3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    pixel00: Point3,
    step_x: Vec3,
    step_y: Vec3,
    disk_u: Vec3,
    disk_v: Vec3,
    sample_scale: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            samples_per_pixel: 10,
            max_depth: 10,
            gamma_correct: true,
            look_from: Point3::ZERO,
            look_at: Point3::NEG_Z,
            vup: Vec3::Y,
            vfov: 90.0,
            defocus_angle: 0.0,
            focus_dist: 10.0,
            view: Viewport::default(),
        }
    }

    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Place the eye at `look_from`, aimed at `look_at`, with `vup` roughly up.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        (self.look_from, self.look_at, self.vup) = (look_from, look_at, vup);
        self
    }

    /// Field of view and depth of field, angles in degrees.
    pub fn with_lens(mut self, vfov: f32, defocus_angle: f32, focus_dist: f32) -> Self {
        (self.vfov, self.defocus_angle, self.focus_dist) = (vfov, defocus_angle, focus_dist);
        self
    }

    /// Square-root (gamma 2) encode output pixels.
    pub fn with_gamma(mut self, gamma_correct: bool) -> Self {
        self.gamma_correct = gamma_correct;
        self
    }

    pub fn look_from(&self) -> Point3 {
        self.look_from
    }

    pub fn look_at(&self) -> Point3 {
        self.look_at
    }

    pub fn vup(&self) -> Vec3 {
        self.vup
    }

    pub fn vfov(&self) -> f32 {
        self.vfov
    }

    pub fn defocus_angle(&self) -> f32 {
        self.defocus_angle
    }

    pub fn focus_dist(&self) -> f32 {
        self.focus_dist
    }

    /// `1 / samples_per_pixel`, valid after [`Camera::initialize`].
    pub fn pixel_samples_scale(&self) -> f32 {
        self.view.sample_scale
    }

    /// Derive the viewport for a `width` x `height` raster.
    pub fn initialize(&mut self, width: u32, height: u32) {
        debug_assert!(self.samples_per_pixel > 0, "samples_per_pixel must be > 0");
        if self.samples_per_pixel == 0 {
            log::warn!("samples_per_pixel is 0, every pixel will be black");
        }

        let (width, height) = (width.max(1) as f32, height.max(1) as f32);

        // Orthonormal basis, w points back out of the screen
        let w = (self.look_from - self.look_at).unit_vector();
        let u = self.vup.cross(w).unit_vector();
        let v = w.cross(u);

        // The image plane sits at the focus distance
        let half_height = (self.vfov.to_radians() * 0.5).tan() * self.focus_dist;
        let span_y = 2.0 * half_height;
        let span_x = span_y * width / height;
        let across = u * span_x;
        let down = v * -span_y;

        let step_x = across / width;
        let step_y = down / height;
        let corner = self.look_from - w * self.focus_dist - (across + down) * 0.5;

        let disk_radius = self.focus_dist * (self.defocus_angle.to_radians() * 0.5).tan();

        self.view = Viewport {
            eye: self.look_from,
            u,
            v,
            w,
            pixel00: corner + (step_x + step_y) * 0.5,
            step_x,
            step_y,
            disk_u: u * disk_radius,
            disk_v: v * disk_radius,
            sample_scale: 1.0 / self.samples_per_pixel.max(1) as f32,
        };

        log::debug!(
            "Camera initialized for {}x{}: u={:?} v={:?} w={:?}, lens radius {}",
            width,
            height,
            self.view.u,
            self.view.v,
            self.view.w,
            disk_radius
        );
    }

    /// A jittered ray through pixel column `i`, row `j` (row 0 at the top).
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let view = &self.view;
        let jitter_x = random_f32(rng) - 0.5;
        let jitter_y = random_f32(rng) - 0.5;
        let target = view.pixel00
            + view.step_x * (i as f32 + jitter_x)
            + view.step_y * (j as f32 + jitter_y);

        let origin = if self.defocus_angle > 0.0 {
            let p = random_in_unit_disk(rng);
            view.eye + view.disk_u * p.x + view.disk_v * p.y
        } else {
            view.eye
        };

        Ray::new(origin, target - origin)
    }

    /// Initialize for the sink's size, then render `world` into it.
    pub fn render(&mut self, world: &dyn Hittable, sink: &mut dyn RasterSink, rng: &mut dyn RngCore) {
        self.initialize(sink.width(), sink.height());
        renderer::render(self, world, sink, rng);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_camera_defaults() {
        let camera = Camera::default();
        assert_eq!(camera.samples_per_pixel, 10);
        assert_eq!(camera.max_depth, 10);
        assert_eq!(camera.vfov(), 90.0);
        assert_eq!(camera.look_at(), Vec3::NEG_Z);
        assert_eq!(camera.vup(), Vec3::Y);
        assert_eq!(camera.defocus_angle(), 0.0);
        assert_eq!(camera.focus_dist(), 10.0);
        assert!(camera.gamma_correct);
    }

    #[test]
    fn test_camera_initialize() {
        let mut camera = Camera::new()
            .with_quality(4, 5)
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0);

        camera.initialize(800, 600);

        assert_eq!(camera.view.eye, Vec3::ZERO);
        assert!((camera.view.w - Vec3::Z).length() < 0.001);
        assert!((camera.view.u - Vec3::X).length() < 0.001);
        assert!((camera.view.v - Vec3::Y).length() < 0.001);
        assert_eq!(camera.pixel_samples_scale(), 0.25);

        // vfov 90 at focus distance 1 gives a viewport 2 units tall
        assert!((camera.view.step_y.y + 2.0 / 600.0).abs() < 1e-6);
        assert!((camera.view.step_x.x - (2.0 * 800.0 / 600.0) / 800.0).abs() < 1e-6);
    }

    #[test]
    fn test_camera_ray_direction() {
        let mut camera = Camera::new()
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0);
        camera.initialize(100, 100);

        let mut rng = StdRng::seed_from_u64(42);

        // Center ray should point towards -Z and start at the eye
        let ray = camera.get_ray(50, 50, &mut rng);
        assert_eq!(ray.origin(), Vec3::ZERO);
        assert!(ray.direction().z < 0.0);
        assert!(ray.direction().x.abs() < 0.05);
        assert!(ray.direction().y.abs() < 0.05);

        // Top-left pixel points up and to the left
        let ray = camera.get_ray(0, 0, &mut rng);
        assert!(ray.direction().x < 0.0);
        assert!(ray.direction().y > 0.0);
    }

    #[test]
    fn test_jitter_stays_inside_pixel() {
        let mut camera = Camera::new().with_lens(90.0, 0.0, 1.0);
        camera.initialize(10, 10);
        let mut rng = StdRng::seed_from_u64(3);

        let center = camera.view.pixel00 + 4.0 * camera.view.step_x + 7.0 * camera.view.step_y;
        for _ in 0..200 {
            let ray = camera.get_ray(4, 7, &mut rng);
            let target = ray.origin() + ray.direction();
            let offset = target - center;
            assert!(offset.x.abs() <= camera.view.step_x.x.abs() * 0.5 + 1e-6);
            assert!(offset.y.abs() <= camera.view.step_y.y.abs() * 0.5 + 1e-6);
        }
    }

    #[test]
    fn test_defocus_moves_ray_origin() {
        let mut camera = Camera::new()
            .with_position(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y)
            .with_lens(40.0, 10.0, 5.0);
        camera.initialize(32, 32);
        let mut rng = StdRng::seed_from_u64(17);

        let radius = 5.0 * (5.0f32).to_radians().tan();
        let mut moved = false;
        for _ in 0..50 {
            let ray = camera.get_ray(16, 16, &mut rng);
            let offset = ray.origin() - camera.look_from();
            assert!(offset.length() <= radius + 1e-5);
            assert!(offset.z.abs() < 1e-5);
            moved |= offset.length() > 0.0;
        }
        assert!(moved);
    }
}
