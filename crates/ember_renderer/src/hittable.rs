//! Hittable geometry and HitRecord for ray-object intersection.

use crate::{Material, MovingSphere, Ray, Sphere};
use ember_math::{Interval, Vec3};

/// Record of a ray-object intersection.
///
/// Only produced by a successful hit. The material is borrowed from the
/// scene, so a record never outlives the geometry that produced it.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal, always pointing against the incoming ray
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Material at the intersection point
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Build a record for a hit at `t`, orienting `outward_normal` against the ray.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3, material: &'a Material) -> Self {
        let mut rec = Self {
            p: ray.at(t),
            normal: outward_normal,
            t,
            front_face: true,
            material,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction.dot(outward_normal) < 0.0;

        // Normal always points against the ray
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Anything a ray can be intersected with.
///
/// The variant set is closed, so dispatch is a plain match.
#[derive(Debug, Clone)]
pub enum Hittable {
    Sphere(Sphere),
    MovingSphere(MovingSphere),
    List(HittableList),
}

impl Hittable {
    /// Test if a ray hits this object within `ray_t`.
    ///
    /// Returns the nearest hit whose `t` lies in `[ray_t.min, ray_t.max]`.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            Hittable::Sphere(sphere) => sphere.hit(ray, ray_t),
            Hittable::MovingSphere(sphere) => sphere.hit(ray, ray_t),
            Hittable::List(list) => list.hit(ray, ray_t),
        }
    }
}

impl From<Sphere> for Hittable {
    fn from(sphere: Sphere) -> Self {
        Hittable::Sphere(sphere)
    }
}

impl From<MovingSphere> for Hittable {
    fn from(sphere: MovingSphere) -> Self {
        Hittable::MovingSphere(sphere)
    }
}

impl From<HittableList> for Hittable {
    fn from(list: HittableList) -> Self {
        Hittable::List(list)
    }
}

/// A list of hittable objects, tested exhaustively.
#[derive(Debug, Clone, Default)]
pub struct HittableList {
    objects: Vec<Hittable>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: impl Into<Hittable>) {
        self.objects.push(object.into());
    }

    /// Clear all objects from the list.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[Hittable] {
        &self.objects
    }

    /// Find the closest hit among all children.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

impl<H: Into<Hittable>> Extend<H> for HittableList {
    fn extend<I: IntoIterator<Item = H>>(&mut self, iter: I) {
        self.objects.extend(iter.into_iter().map(Into::into));
    }
}

impl From<Vec<Hittable>> for HittableList {
    fn from(objects: Vec<Hittable>) -> Self {
        Self { objects }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Lambertian};
    use std::sync::Arc;

    fn grey() -> Arc<Material> {
        Arc::new(Lambertian::new(Color::splat(0.5)).into())
    }

    fn overlapping_spheres() -> HittableList {
        let material = grey();
        let mut list = HittableList::new();
        // Added far-to-near so the first hit found is not the closest
        list.add(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, material.clone()));
        list.add(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.5, material.clone()));
        list.add(Sphere::new(Vec3::new(0.2, 0.1, -2.0), 0.5, material));
        list
    }

    #[test]
    fn test_empty_list_misses() {
        let list = HittableList::new();
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::NEG_Z);
        assert!(list.is_empty());
        assert!(list.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_list_returns_closest_hit() {
        let list = overlapping_spheres();
        let interval = Interval::new(0.001, f32::INFINITY);
        let directions = [
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.1, 0.05, -1.0),
            Vec3::new(-0.2, 0.1, -1.0),
            Vec3::new(0.3, -0.3, -1.0),
        ];

        for direction in directions {
            let ray = Ray::new_simple(Vec3::ZERO, direction);
            let min_t = list
                .objects
                .iter()
                .filter_map(|o| o.hit(&ray, interval))
                .map(|rec| rec.t)
                .fold(f32::INFINITY, f32::min);

            let rec = list.hit(&ray, interval).expect("ray should hit the cluster");
            assert_eq!(rec.t, min_t, "direction {:?}", direction);
        }
    }

    #[test]
    fn test_list_respects_t_max() {
        let list = overlapping_spheres();
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::NEG_Z);
        // Everything lies beyond t = 1.0
        assert!(list.hit(&ray, Interval::new(0.001, 1.0)).is_none());
    }

    #[test]
    fn test_nested_lists() {
        let mut inner = HittableList::new();
        inner.add(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5, grey()));

        let mut outer = HittableList::new();
        outer.add(Sphere::new(Vec3::new(0.0, 0.0, -6.0), 0.5, grey()));
        outer.add(inner);
        assert_eq!(outer.len(), 2);

        let ray = Ray::new_simple(Vec3::ZERO, Vec3::NEG_Z);
        let rec = outer.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.t - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_set_face_normal_from_inside() {
        let material = Material::from(Lambertian::new(Color::ONE));
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::X);
        let rec = HitRecord::new(&ray, 1.0, Vec3::X, &material);

        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::NEG_X);
        assert_eq!(rec.p, Vec3::X);
    }

    #[test]
    fn test_extend_and_clear() {
        let material = grey();
        let mut list = HittableList::new();
        list.extend((0..4).map(|i| Sphere::new(Vec3::new(i as f32, 0.0, -3.0), 0.25, material.clone())));
        assert_eq!(list.len(), 4);

        list.clear();
        assert!(list.is_empty());
    }
}
