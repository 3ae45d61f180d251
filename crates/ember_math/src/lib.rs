// Re-export glam for convenience
pub use glam::*;

// Ember math types
mod interval;
mod ray;
pub mod sampling;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::VectorExt;
