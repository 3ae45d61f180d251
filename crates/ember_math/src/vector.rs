// Optics helpers for Vec3
//
// Extends glam::Vec3 with the reflection/refraction operations the
// scattering models are built from.

use glam::Vec3;

/// Threshold below which every component counts as zero.
const NEAR_ZERO: f32 = 1e-8;

/// Extension trait for Vec3 to provide light-transport utilities
pub trait VectorExt {
    /// Mirror this vector about the plane with normal `n`.
    ///
    /// `n` must be unit length; `self` need not be.
    fn reflect_about(self, n: Vec3) -> Self;

    /// Bend a unit direction through a surface with unit normal `n` using
    /// Snell's law, where `eta_ratio` is eta_incident / eta_transmitted.
    ///
    /// The normal must oppose the incoming direction. Callers are expected
    /// to have ruled out total internal reflection beforehand.
    fn refract_through(self, n: Vec3, eta_ratio: f32) -> Self;

    /// True if every component magnitude is below 1e-8.
    fn near_zero(self) -> bool;
}

impl VectorExt for Vec3 {
    #[inline]
    fn reflect_about(self, n: Vec3) -> Vec3 {
        self - 2.0 * self.dot(n) * n
    }

    #[inline]
    fn refract_through(self, n: Vec3, eta_ratio: f32) -> Vec3 {
        let cos_theta = (-self).dot(n).min(1.0);
        let r_out_perp = eta_ratio * (self + cos_theta * n);
        let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
        r_out_perp + r_out_parallel
    }

    #[inline]
    fn near_zero(self) -> bool {
        self.abs().max_element() < NEAR_ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_reflect_about_floor() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(v.reflect_about(Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_reflect_grazing_is_unchanged() {
        // A direction lying in the surface plane is its own reflection
        let v = Vec3::new(0.0, 0.0, -1.0);
        assert_eq!(v.reflect_about(Vec3::Y), v);
    }

    #[test]
    fn test_refract_unit_ratio_does_not_bend() {
        let n = Vec3::Y;
        for angle_deg in [0.0_f32, 15.0, 30.0, 45.0, 60.0, 80.0, 89.0] {
            let a = angle_deg.to_radians();
            let incident = Vec3::new(a.sin(), -a.cos(), 0.0);
            let refracted = incident.refract_through(n, 1.0);
            assert!(
                approx_eq(refracted, incident),
                "angle {} bent {:?} into {:?}",
                angle_deg,
                incident,
                refracted
            );
        }
    }

    #[test]
    fn test_refract_into_denser_medium_bends_toward_normal() {
        let a = 45.0_f32.to_radians();
        let incident = Vec3::new(a.sin(), -a.cos(), 0.0);
        let refracted = incident.refract_through(Vec3::Y, 1.0 / 1.5);

        // sin(theta_t) = sin(theta_i) / 1.5
        let expected_sin = a.sin() / 1.5;
        assert!((refracted.x - expected_sin).abs() < 1e-5);
        assert!(refracted.y < 0.0);
        assert!((refracted.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_near_zero() {
        assert!(Vec3::ZERO.near_zero());
        assert!(Vec3::new(1e-9, -1e-9, 0.0).near_zero());
        assert!(!Vec3::new(1e-9, 1e-3, 0.0).near_zero());
    }
}
