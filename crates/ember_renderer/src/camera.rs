//! Thin-lens camera for ray generation.

use ember_math::sampling::{random_in_unit_disk, random_range};
use ember_math::Vec3;
use rand::RngCore;

use crate::{CameraError, Ray};

/// Parameters a camera is built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    // Camera positioning
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub vup: Vec3,

    // Lens settings
    pub vfov: f32,         // Vertical field of view in degrees
    pub aspect_ratio: f32, // Viewport width / height
    pub aperture: f32,     // Lens diameter, 0 = pinhole
    pub focus_dist: f32,   // Distance from camera to plane of perfect focus

    // Shutter interval for motion blur
    pub shutter_open: f32,
    pub shutter_close: f32,
}

impl CameraConfig {
    /// Create a pinhole camera config looking from `look_from` at `look_at`.
    pub fn new(look_from: Vec3, look_at: Vec3) -> Self {
        Self {
            look_from,
            look_at,
            vup: Vec3::Y,
            vfov: 90.0,
            aspect_ratio: 16.0 / 9.0,
            aperture: 0.0,
            focus_dist: 1.0,
            shutter_open: 0.0,
            shutter_close: 0.0,
        }
    }

    /// Set the up vector.
    pub fn with_up(mut self, vup: Vec3) -> Self {
        self.vup = vup;
        self
    }

    /// Set the vertical field of view in degrees.
    pub fn with_fov(mut self, vfov: f32) -> Self {
        self.vfov = vfov;
        self
    }

    /// Set the viewport aspect ratio (width / height).
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set the lens diameter.
    pub fn with_aperture(mut self, aperture: f32) -> Self {
        self.aperture = aperture;
        self
    }

    /// Set the distance to the plane of perfect focus.
    pub fn with_focus_distance(mut self, focus_dist: f32) -> Self {
        self.focus_dist = focus_dist;
        self
    }

    /// Set the shutter interval rays are time-sampled over.
    pub fn with_shutter(mut self, open: f32, close: f32) -> Self {
        self.shutter_open = open;
        self.shutter_close = close;
        self
    }

    /// Check the configuration, failing on anything that would produce NaNs.
    pub fn validate(&self) -> Result<(), CameraError> {
        if !(self.focus_dist.is_finite() && self.focus_dist > 0.0) {
            return Err(CameraError::InvalidFocusDistance(self.focus_dist));
        }
        if !(self.shutter_close >= self.shutter_open) {
            return Err(CameraError::InvertedShutter {
                open: self.shutter_open,
                close: self.shutter_close,
            });
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(CameraError::InvalidFieldOfView(self.vfov));
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(CameraError::InvalidAspectRatio(self.aspect_ratio));
        }
        if !(self.aperture >= 0.0) {
            return Err(CameraError::NegativeAperture(self.aperture));
        }

        let view = self.look_from - self.look_at;
        if view.length_squared() == 0.0 || self.vup.cross(view).length_squared() == 0.0 {
            return Err(CameraError::DegenerateView);
        }

        Ok(())
    }
}

/// Camera for generating rays into the scene.
///
/// All state is derived once at construction; the camera is immutable
/// afterwards and can be shared freely between render threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
    shutter_open: f32,
    shutter_close: f32,
}

impl Camera {
    /// Build a camera from its configuration.
    pub fn new(config: &CameraConfig) -> Result<Self, CameraError> {
        config.validate()?;

        // Calculate viewport dimensions
        let theta = config.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = config.aspect_ratio * viewport_height;

        // Calculate camera basis vectors
        let w = (config.look_from - config.look_at).normalize();
        let u = config.vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = config.look_from;
        let horizontal = config.focus_dist * viewport_width * u;
        let vertical = config.focus_dist * viewport_height * v;
        let lower_left_corner =
            origin - horizontal / 2.0 - vertical / 2.0 - config.focus_dist * w;

        Ok(Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: config.aperture / 2.0,
            shutter_open: config.shutter_open,
            shutter_close: config.shutter_close,
        })
    }

    /// Generate a ray through normalized image coordinates `(s, t)`.
    ///
    /// `(0, 0)` is the lower-left corner of the viewport and `(1, 1)` the
    /// upper-right. The origin is jittered over the lens disk and the time
    /// drawn uniformly from the shutter interval.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius <= 0.0 {
            Vec3::ZERO
        } else {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        };

        let time = if self.shutter_close > self.shutter_open {
            random_range(rng, self.shutter_open, self.shutter_close)
        } else {
            self.shutter_open
        };

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical
                - self.origin
                - offset,
            time,
        )
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Unit vector pointing from the target back towards the eye.
    pub fn backward(&self) -> Vec3 {
        self.w
    }

    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }

    pub fn shutter(&self) -> (f32, f32) {
        (self.shutter_open, self.shutter_close)
    }
}
