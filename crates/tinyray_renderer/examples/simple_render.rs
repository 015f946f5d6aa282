//! Simple path tracer example.
//!
//! Renders the random-spheres cover scene and saves it as PPM.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tinyray_renderer::{scenes, ImageBuffer};

fn main() -> Result<(), tinyray_renderer::OutputError> {
    println!("tinyray - Simple Example");
    println!("========================");

    let mut rng = StdRng::seed_from_u64(2024);

    let start = std::time::Instant::now();
    let (camera, world) = scenes::random_spheres(&mut rng);
    println!("Scene built with {} spheres in {:?}", world.len(), start.elapsed());

    let mut camera = camera.with_quality(20, 10);
    let mut image = ImageBuffer::new(400, 225);

    println!(
        "Rendering {}x{} @ {} spp...",
        400, 225, camera.samples_per_pixel
    );
    let start = std::time::Instant::now();
    camera.render(&world, &mut image, &mut rng);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    image.save(filename)?;
    println!("Saved to {}", filename);
    Ok(())
}
