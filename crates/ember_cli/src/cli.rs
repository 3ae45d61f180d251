use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use ember_renderer::RenderConfig;
use log::LevelFilter;

/// Quality presets the individual flags override
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// 640 wide, 100 samples per pixel
    Dev,
    /// 640 wide, 500 samples per pixel
    Default,
    /// 1920 wide, 500 samples per pixel
    FullHd,
}

impl Preset {
    pub fn config(self) -> RenderConfig {
        match self {
            Preset::Dev => RenderConfig::dev(),
            Preset::Default => RenderConfig::default(),
            Preset::FullHd => RenderConfig::full_hd(),
        }
    }
}

/// Built-in scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneChoice {
    /// Ground plane covered in small random spheres, three large ones in front
    RandomSpheres,
    /// A ring of moving spheres around a fuzzy metal ball
    SphereRing,
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "ember")]
#[command(about = "A CPU path tracer for spheres", version)]
pub struct Args {
    /// Quality preset; individual flags below override it
    #[arg(long, value_enum, default_value = "dev")]
    pub preset: Preset,

    /// Scene to render
    #[arg(long, value_enum, default_value = "sphere-ring")]
    pub scene: SceneChoice,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image aspect ratio (width / height)
    #[arg(long)]
    pub aspect_ratio: Option<f32>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum number of bounces per path
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Seed for scene generation and sampling; random if omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output TGA path; defaults to <scene>_<width>x<height>_<samples>.tga
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Stop rendering after this many seconds
    #[arg(long)]
    pub time_limit: Option<f64>,

    /// Log verbosity: off, error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}

impl Args {
    /// The preset with any explicit overrides applied.
    pub fn render_config(&self) -> RenderConfig {
        let mut config = self.preset.config();
        if let Some(width) = self.width {
            config.image_width = width;
        }
        if let Some(aspect_ratio) = self.aspect_ratio {
            config.aspect_ratio = aspect_ratio;
        }
        if let Some(samples) = self.samples {
            config.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        config.seed = self.seed;
        config
    }
}

/// Default output file name for a render.
pub fn default_output_path(scene_name: &str, config: &RenderConfig) -> PathBuf {
    PathBuf::from(format!(
        "{}_{}x{}_{}.tga",
        scene_name,
        config.image_width,
        config.image_height(),
        config.samples_per_pixel
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["ember"]);
        assert_eq!(args.preset, Preset::Dev);
        assert_eq!(args.scene, SceneChoice::SphereRing);
        assert_eq!(args.render_config(), RenderConfig::dev());
    }

    #[test]
    fn test_overrides_apply_on_top_of_preset() {
        let args = Args::parse_from([
            "ember",
            "--preset",
            "full-hd",
            "--samples",
            "16",
            "--max-depth",
            "4",
            "--seed",
            "9",
            "--scene",
            "random-spheres",
        ]);
        let config = args.render_config();

        assert_eq!(config.image_width, 1920);
        assert_eq!(config.samples_per_pixel, 16);
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.seed, Some(9));
        assert_eq!(args.scene, SceneChoice::RandomSpheres);
    }

    #[test]
    fn test_default_output_path() {
        let path = default_output_path("sphere_ring", &RenderConfig::dev());
        assert_eq!(path, PathBuf::from("sphere_ring_640x360_100.tga"));
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(Args::parse_from(["ember"]).log_level, LevelFilter::Info);

        let args = Args::parse_from(["ember", "--log-level", "debug"]);
        assert_eq!(args.log_level, LevelFilter::Debug);

        assert!(Args::try_parse_from(["ember", "--log-level", "loud"]).is_err());
    }
}
