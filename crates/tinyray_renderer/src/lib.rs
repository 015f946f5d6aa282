//! tinyray renderer - CPU path tracing
//!
//! A small Monte Carlo path tracer: spheres, three material models, a thin-lens
//! camera and a recursive integrator that writes into any [`RasterSink`].
//!
//! # Example
//!
//! ```no_run
//! use rand::SeedableRng;
//! use tinyray_renderer::{scenes, ImageBuffer};
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let (mut camera, world) = scenes::three_spheres();
//! let mut image = ImageBuffer::new(320, 240);
//! camera.render(&world, &mut image, &mut rng);
//! image.save("three_spheres.png")?;
//! # Ok::<(), tinyray_renderer::OutputError>(())
//! ```

mod camera;
mod color;
mod hittable;
mod material;
mod renderer;
mod sink;
mod sphere;

pub mod scene_file;
pub mod scenes;

pub use camera::Camera;
pub use color::{encode_color, linear_to_gamma, rgb565, Color, Rgb8};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use renderer::{ray_color, render, render_pixel, sky_gradient, SHADOW_ACNE_EPSILON};
pub use sink::{ImageBuffer, OutputError, OutputResult, PanelFramebuffer, RasterSink};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from tinyray_math
pub use tinyray_math::{Interval, Point3, Ray, Vec3};
