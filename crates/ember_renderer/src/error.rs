//! Error types for scene setup, rendering and image output.
//!
//! Everything here is raised before or after the per-pixel hot path;
//! intersection and scattering themselves are total.

use thiserror::Error;

/// Errors raised while building a camera from its configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("Focus distance must be positive and finite, got {0}")]
    InvalidFocusDistance(f32),

    #[error("Shutter closes before it opens: open={open}, close={close}")]
    InvertedShutter { open: f32, close: f32 },

    #[error("Vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),

    #[error("Aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f32),

    #[error("Aperture must not be negative, got {0}")]
    NegativeAperture(f32),

    #[error("Degenerate view: look-from equals look-at or up is parallel to the view direction")]
    DegenerateView,
}

/// Errors raised by the frame driver.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Render cancelled after {completed} of {total} scanlines")]
    Cancelled { completed: usize, total: usize },

    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),
}

/// Errors raised while storing or encoding the framebuffer.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image {width}x{height} exceeds the 65535 pixel TGA limit")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("Pixel ({x}, {y}) is outside the image")]
    OutOfBounds { x: u32, y: u32 },
}

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;
