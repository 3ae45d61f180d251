//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction
//! - Parallel scanline rendering with per-scanline random streams

use std::fmt;
use std::time::Instant;

use ember_math::sampling::random_f32;
use ember_math::Interval;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

use crate::framebuffer::TGA_MAX_DIMENSION;
use crate::{Color, Framebuffer, Pixel, Ray, RenderError, RenderProgress, Result, Scene};

/// Nearest hit distance accepted after a bounce; rejects self-intersections
/// caused by floating-point error at the previous surface.
pub const T_MIN: f32 = 0.001;

/// Sky color at the zenith of the miss gradient.
const SKY_ZENITH: Color = Color::new(0.05, 0.13, 1.0);

/// Odd 64-bit constant used to spread scanline indices across seeds.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels
    pub image_width: u32,
    /// Width / height; determines the image height
    pub aspect_ratio: f32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Frame seed; `None` draws a fresh one per render
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 640,
            aspect_ratio: 16.0 / 9.0,
            samples_per_pixel: 500,
            max_depth: 50,
            seed: None,
        }
    }
}

impl RenderConfig {
    /// Low sample count for quick iteration.
    pub fn dev() -> Self {
        Self {
            samples_per_pixel: 100,
            ..Self::default()
        }
    }

    /// 1920 pixels wide at full quality.
    pub fn full_hd() -> Self {
        Self {
            image_width: 1920,
            ..Self::default()
        }
    }

    /// Image height in pixels, `floor(width / aspect_ratio)`.
    pub fn image_height(&self) -> u32 {
        (self.image_width as f32 / self.aspect_ratio) as u32
    }

    /// Reject configurations that cannot produce an image.
    pub fn validate(&self) -> Result<()> {
        if self.image_width == 0 {
            return Err(RenderError::InvalidConfig("image width must be at least 1".into()));
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(RenderError::InvalidConfig(format!(
                "aspect ratio must be positive, got {}",
                self.aspect_ratio
            )));
        }
        if self.image_height() == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "width {} at aspect ratio {} leaves no rows",
                self.image_width, self.aspect_ratio
            )));
        }
        if self.image_width > TGA_MAX_DIMENSION || self.image_height() > TGA_MAX_DIMENSION {
            return Err(RenderError::InvalidConfig(format!(
                "image {}x{} exceeds the {} pixel TGA limit",
                self.image_width,
                self.image_height(),
                TGA_MAX_DIMENSION
            )));
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidConfig("samples per pixel must be at least 1".into()));
        }
        if self.max_depth == 0 {
            return Err(RenderError::InvalidConfig("max depth must be at least 1".into()));
        }
        Ok(())
    }
}

impl fmt::Display for RenderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "image:{}x{}, samples:{}, max_depth:{}",
            self.image_width,
            self.image_height(),
            self.samples_per_pixel,
            self.max_depth
        )
    }
}

/// Per-pixel radiance estimator over a borrowed scene.
#[derive(Debug, Clone, Copy)]
pub struct Tracer<'a> {
    scene: &'a Scene,
    samples_per_pixel: u32,
    max_depth: u32,
    samples_scale: f32,
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene, samples_per_pixel: u32, max_depth: u32) -> Self {
        Self {
            scene,
            samples_per_pixel,
            max_depth,
            samples_scale: 1.0 / samples_per_pixel.max(1) as f32,
        }
    }

    /// Estimate the display color of pixel (x, y) in a `width` x `height` image.
    ///
    /// Returns a gamma-corrected color; quantization is left to the caller.
    pub fn trace(&self, x: u32, y: u32, width: u32, height: u32, rng: &mut dyn RngCore) -> Color {
        let u_span = width.saturating_sub(1).max(1) as f32;
        let v_span = height.saturating_sub(1).max(1) as f32;

        let mut pixel_color = Color::ZERO;
        for _ in 0..self.samples_per_pixel {
            let s = (x as f32 + random_f32(rng)) / u_span;
            let t = (y as f32 + random_f32(rng)) / v_span;

            let ray = self.scene.camera.get_ray(s, t, rng);
            pixel_color += self.ray_color(&ray, self.max_depth, rng);
        }

        // Average the samples
        let linear = pixel_color * self.samples_scale;
        Color::new(
            linear_to_gamma(linear.x),
            linear_to_gamma(linear.y),
            linear_to_gamma(linear.z),
        )
    }

    /// Compute the linear radiance carried back along `ray`.
    ///
    /// Each bounce multiplies in the material's attenuation; the path ends
    /// at the sky, on absorption, or when `depth` runs out.
    pub fn ray_color(&self, ray: &Ray, depth: u32, rng: &mut dyn RngCore) -> Color {
        // If we've exceeded max depth, no more light is gathered
        if depth == 0 {
            return Color::ZERO;
        }

        let Some(rec) = self.scene.world.hit(ray, Interval::new(T_MIN, f32::INFINITY)) else {
            return sky_color(ray);
        };

        match rec.material.scatter(ray, &rec, rng) {
            Some(result) => result.attenuation * self.ray_color(&result.scattered, depth - 1, rng),
            None => Color::ZERO,
        }
    }
}

/// Vertical gradient from white below the horizon to blue at the zenith.
pub fn sky_color(ray: &Ray) -> Color {
    let unit_direction = ray.direction.normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    (1.0 - a) * Color::ONE + a * SKY_ZENITH
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Random stream for one scanline of a frame.
fn scanline_rng(frame_seed: u64, row: u64) -> StdRng {
    StdRng::seed_from_u64(frame_seed ^ row.wrapping_add(1).wrapping_mul(SEED_STRIDE))
}

/// Render the whole frame, one parallel work unit per scanline.
///
/// `progress` must be sized for `config.image_height()` scanlines. It is
/// bumped after every finished scanline, and cancelling it stops the
/// render before the next scanline starts.
pub fn render(
    scene: &Scene,
    config: &RenderConfig,
    progress: &RenderProgress,
) -> Result<Framebuffer> {
    config.validate()?;

    let width = config.image_width;
    let height = config.image_height();
    if progress.total() != height as usize {
        return Err(RenderError::InvalidConfig(format!(
            "progress tracks {} scanlines but the image has {}",
            progress.total(),
            height
        )));
    }

    let frame_seed = config.seed.unwrap_or_else(rand::random);
    let tracer = Tracer::new(scene, config.samples_per_pixel, config.max_depth);

    log::info!(
        "Rendering '{}' ({} objects) with {} on {} threads",
        scene.name,
        scene.object_count(),
        config,
        rayon::current_num_threads()
    );
    log::debug!("Frame seed: {}", frame_seed);
    let start = Instant::now();

    let mut pixels = vec![Pixel::default(); width as usize * height as usize];
    let outcome = pixels
        .par_chunks_mut(width as usize)
        .enumerate()
        .try_for_each(|(j, row)| {
            if progress.is_cancelled() {
                return Err(());
            }

            let mut rng = scanline_rng(frame_seed, j as u64);
            for (i, pixel) in row.iter_mut().enumerate() {
                let color = tracer.trace(i as u32, j as u32, width, height, &mut rng);
                *pixel = Pixel::from_color(color);
            }

            progress.complete_scanline();
            Ok(())
        });

    if outcome.is_err() {
        let completed = progress.completed();
        log::warn!("Render cancelled after {}/{} scanlines", completed, height);
        return Err(RenderError::Cancelled {
            completed,
            total: height as usize,
        });
    }

    log::info!("Rendered in {:.2?}", start.elapsed());
    Ok(Framebuffer::from_pixels(width, height, pixels))
}
