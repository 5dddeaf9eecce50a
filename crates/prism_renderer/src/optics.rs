//! Reflection, refraction and absorption helpers.

use prism_math::Vec3;

/// Reflect a vector about a normal: `d - 2(d·n)n`.
///
/// `n` must be unit length; `d` keeps its length.
#[inline]
pub fn reflect(d: Vec3, n: Vec3) -> Vec3 {
    d - 2.0 * d.dot(n) * n
}

/// Refract a unit direction through a surface with Snell's law.
///
/// `n` is the unit normal on the incoming side (facing against `d`) and
/// `eta` is the ratio of the incoming medium's index of refraction to the
/// outgoing one's. Returns `None` on total internal reflection.
#[inline]
pub fn refract(d: Vec3, n: Vec3, eta: f32) -> Option<Vec3> {
    let cos_i = (-d).dot(n).min(1.0);
    let sin2_t = eta * eta * (1.0 - cos_i * cos_i);
    if sin2_t > 1.0 {
        return None;
    }

    let cos_t = (1.0 - sin2_t).sqrt();
    Some(eta * d + (eta * cos_i - cos_t) * n)
}

/// Fraction of light surviving an absorbing path of the given optical depth
/// (Beer's law).
#[inline]
pub fn transmittance(optical_depth: f32) -> f32 {
    (-optical_depth).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_mirror_law() {
        let n = Vec3::Y;
        let d = Vec3::new(1.0, -1.0, 0.0).normalize();
        let r = reflect(d, n);

        assert!((r - Vec3::new(1.0, 1.0, 0.0).normalize()).length() < EPS);
        assert!((r.length() - 1.0).abs() < EPS);

        // Angle of incidence equals angle of reflection
        assert!(((-d).dot(n) - r.dot(n)).abs() < EPS);
        // Reflected ray stays in the plane of incidence
        assert!(d.cross(n).dot(r).abs() < EPS);
    }

    #[test]
    fn test_reflect_oblique_unit_length() {
        let n = Vec3::new(0.3, 0.9, -0.2).normalize();
        let d = Vec3::new(-0.5, -0.7, 0.4).normalize();
        let r = reflect(d, n);

        assert!((r.length() - 1.0).abs() < EPS);
        assert!(((-d).dot(n) - r.dot(n)).abs() < EPS);
        assert!((r - (d - 2.0 * d.dot(n) * n)).length() < EPS);
    }

    #[test]
    fn test_refraction_at_normal_incidence() {
        let n = Vec3::Z;
        let d = -Vec3::Z;

        for eta in [0.5, 1.0 / 1.5, 1.0, 1.5, 2.4] {
            let t = refract(d, n, eta).expect("normal incidence always transmits");
            assert!((t - d).length() < EPS, "eta {} bent the ray to {:?}", eta, t);
        }
    }

    #[test]
    fn test_refraction_obeys_snell() {
        let n = Vec3::Y;
        let d = Vec3::new(1.0, -1.0, 0.0).normalize(); // 45 degrees
        let eta = 1.0 / 1.5;
        let t = refract(d, n, eta).expect("entering a denser medium");

        assert!((t.length() - 1.0).abs() < EPS);
        let sin_i = d.cross(n).length();
        let sin_t = t.cross(n).length();
        assert!((sin_i - 1.5 * sin_t).abs() < 1e-4);
        // Bent toward the normal, still going down
        assert!(t.y < 0.0);
        assert!(sin_t < sin_i);
    }

    #[test]
    fn test_total_internal_reflection() {
        let n = Vec3::Y;
        let eta = 1.5; // leaving glass into vacuum
        let critical = (1.0f32 / 1.5).asin();

        let steep = critical - 0.05;
        let d = Vec3::new(steep.sin(), -steep.cos(), 0.0);
        assert!(refract(d, n, eta).is_some());

        let shallow = critical + 0.05;
        let d = Vec3::new(shallow.sin(), -shallow.cos(), 0.0);
        assert!(refract(d, n, eta).is_none());
    }

    #[test]
    fn test_transmittance() {
        assert_eq!(transmittance(0.0), 1.0);
        assert!((transmittance(1.0) - (-1.0f32).exp()).abs() < 1e-7);
        assert!(transmittance(f32::INFINITY) == 0.0);
        assert!(transmittance(2.0) < transmittance(1.0));
    }
}
