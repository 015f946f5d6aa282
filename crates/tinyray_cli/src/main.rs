use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tinyray_renderer::{scene_file, scenes, Camera, HittableList, ImageBuffer, PanelFramebuffer};

/// Render a sphere scene with the tinyray path tracer.
#[derive(Parser, Debug)]
#[command(name = "tinyray", version, about)]
struct Args {
    /// Scene to render: `three-spheres`, `random`, or a path to a JSON scene file
    #[arg(short, long, default_value = "three-spheres")]
    scene: String,

    /// Output width in pixels (defaults to the ILI9341 panel)
    #[arg(long, default_value_t = PanelFramebuffer::ILI9341_WIDTH, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Output height in pixels (defaults to the ILI9341 panel)
    #[arg(long, default_value_t = PanelFramebuffer::ILI9341_HEIGHT, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Samples per pixel, overrides the scene's camera
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    samples: Option<u32>,

    /// Maximum bounce depth, overrides the scene's camera
    #[arg(long)]
    depth: Option<u32>,

    /// Seed for the random generator; a fresh one is drawn when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Write linear values without gamma correction
    #[arg(long)]
    no_gamma: bool,

    /// Output file: .ppm, .rgb565 (raw panel framebuffer) or any format `image` can encode
    #[arg(short, long, default_value = "output.png")]
    output: PathBuf,
}

/// Where the scene comes from.
#[derive(Debug, Clone, PartialEq)]
enum SceneSource {
    ThreeSpheres,
    Random,
    File(PathBuf),
}

impl SceneSource {
    fn parse(name: &str) -> Self {
        match name {
            "three-spheres" => SceneSource::ThreeSpheres,
            "random" => SceneSource::Random,
            path => SceneSource::File(PathBuf::from(path)),
        }
    }

    fn build(&self, rng: &mut StdRng) -> Result<(Camera, HittableList)> {
        match self {
            SceneSource::ThreeSpheres => Ok(scenes::three_spheres()),
            SceneSource::Random => Ok(scenes::random_spheres(rng)),
            SceneSource::File(path) => scene_file::load_scene(path)
                .with_context(|| format!("Failed to load scene file {}", path.display())),
        }
    }
}

/// Apply command line overrides on top of the scene's camera.
fn apply_overrides(camera: &mut Camera, args: &Args) {
    if let Some(samples) = args.samples {
        camera.samples_per_pixel = samples;
    }
    if let Some(depth) = args.depth {
        camera.max_depth = depth;
    }
    if args.no_gamma {
        camera.gamma_correct = false;
    }
}

fn is_panel_dump(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("rgb565"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    log::info!("Starting tinyray");

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Using seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let start = Instant::now();
    let (mut camera, world) = SceneSource::parse(&args.scene).build(&mut rng)?;
    apply_overrides(&mut camera, &args);
    log::info!("Scene '{}' built with {} spheres in {:?}", args.scene, world.len(), start.elapsed());

    if is_panel_dump(&args.output) {
        let mut panel = PanelFramebuffer::new(args.width, args.height);
        camera.render(&world, &mut panel, &mut rng);
        panel
            .save_raw(&args.output)
            .with_context(|| format!("Failed to write {}", args.output.display()))?;
    } else {
        let mut image = ImageBuffer::new(args.width, args.height);
        camera.render(&world, &mut image, &mut rng);
        image
            .save(&args.output)
            .with_context(|| format!("Failed to write {}", args.output.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_source_parse() {
        assert_eq!(SceneSource::parse("three-spheres"), SceneSource::ThreeSpheres);
        assert_eq!(SceneSource::parse("random"), SceneSource::Random);
        assert_eq!(
            SceneSource::parse("scenes/cover.json"),
            SceneSource::File(PathBuf::from("scenes/cover.json"))
        );
    }

    #[test]
    fn test_default_args() {
        let args = Args::try_parse_from(["tinyray"]).unwrap();
        assert_eq!(args.width, 240);
        assert_eq!(args.height, 320);
        assert_eq!(args.scene, "three-spheres");
        assert_eq!(args.output, PathBuf::from("output.png"));
        assert!(args.seed.is_none());
    }

    #[test]
    fn test_zero_samples_rejected() {
        assert!(Args::try_parse_from(["tinyray", "--samples", "0"]).is_err());
        assert!(Args::try_parse_from(["tinyray", "--width", "0"]).is_err());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "tinyray", "--samples", "3", "--depth", "7", "--no-gamma",
        ])
        .unwrap();
        let (mut camera, _) = scenes::three_spheres();
        apply_overrides(&mut camera, &args);
        assert_eq!(camera.samples_per_pixel, 3);
        assert_eq!(camera.max_depth, 7);
        assert!(!camera.gamma_correct);
    }

    #[test]
    fn test_missing_scene_file() {
        let mut rng = StdRng::seed_from_u64(0);
        let source = SceneSource::parse("does/not/exist.json");
        assert!(source.build(&mut rng).is_err());
    }

    #[test]
    fn test_panel_dump_extension() {
        assert!(is_panel_dump(Path::new("frame.rgb565")));
        assert!(is_panel_dump(Path::new("frame.RGB565")));
        assert!(!is_panel_dump(Path::new("frame.png")));
    }
}
