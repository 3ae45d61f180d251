//! Built-in procedural scenes.
//!
//! Both scenes draw every random choice from the caller's generator, so a
//! fixed seed always produces the same layout.

use std::f32::consts::TAU;
use std::sync::Arc;

use ember_math::sampling::{random_f32, random_range, random_vec3, random_vec3_range};
use ember_renderer::{
    Camera, CameraConfig, CameraError, Color, Dielectric, Lambertian, Material, Metal,
    MovingSphere, Scene, Sphere, Vec3,
};
use rand::RngCore;

const GLASS_IOR: f32 = 1.5;
const RING_SIZE: usize = 10;
const RING_RADIUS: f32 = 2.1;

fn lambertian(albedo: Color) -> Arc<Material> {
    Arc::new(Lambertian::new(albedo).into())
}

fn metal(albedo: Color, fuzz: f32) -> Arc<Material> {
    Arc::new(Metal::new(albedo, fuzz).into())
}

fn glass() -> Arc<Material> {
    Arc::new(Dielectric::new(GLASS_IOR).into())
}

/// Random diffuse albedo, skewed dark by squaring.
fn random_albedo(rng: &mut dyn RngCore) -> Color {
    random_vec3(rng) * random_vec3(rng)
}

fn random_metal(rng: &mut dyn RngCore) -> Arc<Material> {
    let albedo = random_vec3_range(rng, 0.5, 1.0);
    let fuzz = random_range(rng, 0.0, 0.5);
    metal(albedo, fuzz)
}

/// A huge diffuse sphere standing in for a ground plane.
fn ground(albedo: f32) -> Sphere {
    Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, lambertian(Color::splat(albedo)))
}

/// A field of small random spheres on a 22x22 grid with three large
/// spheres in front. Most small diffuse spheres bounce upward during the
/// shutter interval.
pub fn random_spheres(aspect_ratio: f32, rng: &mut dyn RngCore) -> Result<Scene, CameraError> {
    let camera = Camera::new(
        &CameraConfig::new(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO)
            .with_fov(20.0)
            .with_aspect_ratio(aspect_ratio)
            .with_aperture(0.1)
            .with_focus_distance(10.0)
            .with_shutter(0.0, 1.0),
    )?;

    let mut scene = Scene::new("random_spheres", camera);
    scene.add(ground(0.5));

    let keep_clear = Vec3::new(4.0, 0.2, 0.0);
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random_f32(rng);
            let center = Vec3::new(
                a as f32 + 0.9 * random_f32(rng),
                0.2,
                b as f32 + 0.9 * random_f32(rng),
            );

            if (center - keep_clear).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                let material = lambertian(random_albedo(rng));
                let center2 = center + Vec3::new(0.0, random_range(rng, 0.0, 0.5), 0.0);
                scene.add(MovingSphere::new(center, center2, 0.0, 1.0, 0.2, material));
            } else if choose_mat < 0.95 {
                scene.add(Sphere::new(center, 0.2, random_metal(rng)));
            } else {
                scene.add(Sphere::new(center, 0.2, glass()));
            }
        }
    }

    scene.add(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, glass()));
    scene.add(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        lambertian(Color::new(0.4, 0.2, 0.1)),
    ));
    scene.add(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        metal(Color::new(0.4, 0.2, 0.1), 0.0),
    ));

    log::debug!("Built '{}' with {} objects", scene.name, scene.object_count());
    Ok(scene)
}

/// A fuzzy metal ball circled by ten small moving spheres, plus two
/// diffuse spheres in the background.
pub fn sphere_ring(aspect_ratio: f32, rng: &mut dyn RngCore) -> Result<Scene, CameraError> {
    let center = Vec3::new(0.0, 2.0, 0.0);
    let camera = Camera::new(
        &CameraConfig::new(Vec3::new(-12.0, 2.0, 8.0), center)
            .with_fov(30.0)
            .with_aspect_ratio(aspect_ratio)
            .with_aperture(0.0)
            .with_focus_distance(10.0)
            .with_shutter(0.0, 1.0),
    )?;

    let mut scene = Scene::new("sphere_ring", camera);
    scene.add(ground(0.4));
    scene.add(Sphere::new(center, 2.0, metal(Color::new(0.5, 0.4, 0.4), 0.1)));

    let drift = Vec3::new(0.3, 0.0, 0.3);
    for i in 0..RING_SIZE {
        let (sin, cos) = (TAU * i as f32 / RING_SIZE as f32).sin_cos();
        // Rotating (r, r) about the y axis
        let start = Vec3::new(
            RING_RADIUS * cos - RING_RADIUS * sin,
            center.y,
            RING_RADIUS * sin + RING_RADIUS * cos,
        );

        let material = if i % 3 == 0 {
            random_metal(rng)
        } else if i % 4 == 0 {
            glass()
        } else {
            lambertian(random_albedo(rng))
        };
        scene.add(MovingSphere::new(start, start + drift, 0.0, 1.0, 0.5, material));
    }

    scene.add(Sphere::new(
        Vec3::new(center.x + 1.0, 0.5, center.z - 8.5),
        0.5,
        lambertian(random_albedo(rng)),
    ));
    scene.add(Sphere::new(
        Vec3::new(center.x - 3.0, 0.5, center.z - 6.0),
        0.5,
        lambertian(random_albedo(rng)),
    ));

    log::debug!("Built '{}' with {} objects", scene.name, scene.object_count());
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_renderer::{Hittable, Interval, Ray, T_MIN};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sphere_ring_layout() {
        let mut rng = StdRng::seed_from_u64(1);
        let scene = sphere_ring(16.0 / 9.0, &mut rng).unwrap();

        // Ground, centre ball, ring, two background spheres
        assert_eq!(scene.object_count(), 2 + RING_SIZE + 2);
        assert_eq!(scene.name, "sphere_ring");
        assert_eq!(scene.camera.lens_radius(), 0.0);
        assert_eq!(scene.camera.shutter(), (0.0, 1.0));
    }

    #[test]
    fn test_sphere_ring_spheres_move() {
        let mut rng = StdRng::seed_from_u64(1);
        let scene = sphere_ring(1.0, &mut rng).unwrap();

        let moving: Vec<_> = scene
            .world
            .objects()
            .iter()
            .filter_map(|h| match h {
                Hittable::MovingSphere(s) => Some(s),
                _ => None,
            })
            .collect();
        assert_eq!(moving.len(), RING_SIZE);

        for sphere in moving {
            let offset = sphere.center(1.0) - sphere.center(0.0);
            assert!((offset - Vec3::new(0.3, 0.0, 0.3)).length() < 1e-5);
            assert!((sphere.center(0.0).y - 2.0).abs() < 1e-6);
            assert_eq!(sphere.radius(), 0.5);
        }
    }

    #[test]
    fn test_random_spheres_is_reproducible() {
        let a = random_spheres(1.5, &mut StdRng::seed_from_u64(11)).unwrap();
        let b = random_spheres(1.5, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(a.object_count(), b.object_count());

        // Same layout means identical hits along an arbitrary probe ray
        let probe = Ray::new(Vec3::new(13.0, 2.0, 3.0), Vec3::new(-13.0, -1.8, -3.0), 0.5);
        let ray_t = Interval::new(T_MIN, f32::INFINITY);
        let hit_a = a.world.hit(&probe, ray_t).map(|r| (r.t, r.p));
        let hit_b = b.world.hit(&probe, ray_t).map(|r| (r.t, r.p));
        assert_eq!(hit_a, hit_b);
    }

    #[test]
    fn test_random_spheres_keeps_large_spheres_clear() {
        let scene = random_spheres(16.0 / 9.0, &mut StdRng::seed_from_u64(5)).unwrap();
        // Ground plus at most 22x22 small spheres plus three large ones
        assert!(scene.object_count() > 4);
        assert!(scene.object_count() <= 1 + 22 * 22 + 3);

        let keep_clear = Vec3::new(4.0, 0.2, 0.0);
        for object in scene.world.objects() {
            if let Hittable::Sphere(s) = object {
                if s.radius() == 0.2 {
                    assert!((s.center() - keep_clear).length() > 0.9);
                }
            }
        }
    }

    #[test]
    fn test_invalid_aspect_ratio_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(random_spheres(0.0, &mut rng).is_err());
        assert!(sphere_ring(-1.0, &mut rng).is_err());
    }
}
