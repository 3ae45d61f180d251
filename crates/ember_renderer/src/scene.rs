//! A renderable scene: a camera plus a flat list of primitives.

use crate::{Camera, Hittable, HittableList};

/// Everything the integrator reads during a render.
///
/// Scenes are assembled once and then only borrowed immutably, so a single
/// instance can be shared by all render threads.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Scene name (used for output file naming)
    pub name: String,
    /// Camera the frame is seen through
    pub camera: Camera,
    /// Root of the geometry
    pub world: HittableList,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>, camera: Camera) -> Self {
        Self {
            name: name.into(),
            camera,
            world: HittableList::new(),
        }
    }

    /// Add a primitive to the scene root.
    pub fn add(&mut self, object: impl Into<Hittable>) {
        self.world.add(object);
    }

    /// Number of top-level primitives.
    pub fn object_count(&self) -> usize {
        self.world.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CameraConfig, Color, Lambertian, Material, Sphere, Vec3};
    use std::sync::Arc;

    #[test]
    fn test_scene_add() {
        let camera = Camera::new(&CameraConfig::new(Vec3::ZERO, Vec3::NEG_Z)).unwrap();
        let mut scene = Scene::new("unit", camera);
        assert_eq!(scene.object_count(), 0);

        let material: Arc<Material> = Arc::new(Lambertian::new(Color::splat(0.5)).into());
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, material.clone()));
        scene.add(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, material));

        assert_eq!(scene.name, "unit");
        assert_eq!(scene.object_count(), 2);
    }
}
