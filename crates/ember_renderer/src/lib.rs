//! Ember Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer over a flat list of analytic primitives:
//! spheres (static or moving), with diffuse, metal and glass materials,
//! a thin-lens camera with a shutter interval, and a depth-bounded
//! recursive integrator.
//!
//! # Example
//!
//! ```ignore
//! use ember_renderer::{render, Camera, CameraConfig, RenderConfig, RenderProgress, Scene};
//!
//! let config = RenderConfig::dev();
//! let camera = Camera::new(&CameraConfig::new(look_from, look_at))?;
//! let mut scene = Scene::new("demo", camera);
//! scene.add(sphere);
//!
//! let progress = RenderProgress::new(config.image_height() as usize);
//! let image = render(&scene, &config, &progress)?;
//! image.save_tga("demo.tga")?;
//! ```

mod camera;
mod error;
mod framebuffer;
mod hittable;
mod material;
mod progress;
mod renderer;
mod scene;
mod sphere;

pub use camera::{Camera, CameraConfig};
pub use error::{CameraError, ImageError, RenderError, Result};
pub use framebuffer::{Framebuffer, Pixel, TGA_HEADER_LEN, TGA_MAX_DIMENSION};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Color, Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use progress::RenderProgress;
pub use renderer::{linear_to_gamma, render, sky_color, RenderConfig, Tracer, T_MIN};
pub use scene::Scene;
pub use sphere::{MovingSphere, Sphere};

/// Re-export Vec3 and common math types from ember_math
pub use ember_math::{Interval, Ray, Vec3};
