use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use ember_renderer::{render, RenderProgress, Scene};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod cli;
mod progress;
mod scenes;

use cli::{default_output_path, Args, SceneChoice};
use progress::ProgressReporter;

/// The command-line level is the baseline; `RUST_LOG` directives refine it.
fn init_logging(level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn build_scene(choice: SceneChoice, aspect_ratio: f32, seed: u64) -> Result<Scene> {
    let mut rng = StdRng::seed_from_u64(seed);
    let scene = match choice {
        SceneChoice::RandomSpheres => scenes::random_spheres(aspect_ratio, &mut rng),
        SceneChoice::SphereRing => scenes::sphere_ring(aspect_ratio, &mut rng),
    };
    scene.context("Failed to set up scene camera")
}

fn parse_time_limit(seconds: Option<f64>) -> Result<Option<Duration>> {
    seconds
        .map(|s| {
            Duration::try_from_secs_f64(s)
                .with_context(|| format!("Invalid time limit: {} seconds", s))
        })
        .transpose()
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level);

    let mut config = args.render_config();
    config.validate().context("Invalid render settings")?;
    let time_limit = parse_time_limit(args.time_limit)?;

    // One seed drives both scene layout and sampling so a run can be repeated
    let seed = config.seed.unwrap_or_else(rand::random);
    config.seed = Some(seed);
    log::info!("Seed: {}", seed);

    let scene = build_scene(args.scene, config.aspect_ratio, seed)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&scene.name, &config));

    let progress = Arc::new(RenderProgress::new(config.image_height() as usize));
    let reporter = ProgressReporter::spawn(Arc::clone(&progress), time_limit)?;
    let result = render(&scene, &config, &progress);
    reporter.finish();

    let image = result.context("Render failed")?;
    image
        .save_tga(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Wrote {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_limit() {
        assert_eq!(parse_time_limit(None).unwrap(), None);
        assert_eq!(
            parse_time_limit(Some(1.5)).unwrap(),
            Some(Duration::from_millis(1500))
        );
        assert!(parse_time_limit(Some(-1.0)).is_err());
        assert!(parse_time_limit(Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_build_scene_is_seeded() {
        let a = build_scene(SceneChoice::RandomSpheres, 1.5, 3).unwrap();
        let b = build_scene(SceneChoice::RandomSpheres, 1.5, 3).unwrap();
        assert_eq!(a.object_count(), b.object_count());
        assert_eq!(a.name, "random_spheres");
    }
}
