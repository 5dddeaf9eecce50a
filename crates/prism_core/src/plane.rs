//! Infinite plane primitive.

use crate::entity::{Entity, SurfaceHit};
use prism_math::{Interval, Ray, Vec3};

/// An infinite plane through `point` with unit `normal`.
///
/// A one-sided plane is invisible to rays arriving from behind its normal,
/// which makes it usable as a backdrop that does not occlude from behind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    one_sided: bool,
}

impl Plane {
    /// Create a two-sided plane. The normal is normalized.
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize(),
            one_sided: false,
        }
    }

    /// Make the plane visible only from the side its normal points to.
    pub fn one_sided(mut self) -> Self {
        self.one_sided = true;
        self
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Entity for Plane {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        let denom = self.normal.dot(ray.direction());

        // Ray is parallel to the plane
        if denom.abs() < 1e-8 {
            return None;
        }
        if self.one_sided && denom > 0.0 {
            return None;
        }

        let t = (self.point - ray.origin()).dot(self.normal) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        Some(SurfaceHit {
            t,
            point: ray.at(t),
            normal: self.normal,
        })
    }

    fn is_closed(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_hit() {
        let plane = Plane::new(Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0));
        let ray = Ray::new(Vec3::new(1.0, 3.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let hit = plane
            .intersect(&ray, Interval::from_min(0.001))
            .expect("downward ray should hit the ground");

        assert!((hit.t - 3.0).abs() < 1e-5);
        assert!((hit.point - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);
        assert_eq!(hit.normal, Vec3::Y);
    }

    #[test]
    fn test_parallel_ray_misses() {
        let plane = Plane::new(Vec3::ZERO, Vec3::Y);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::X);
        assert!(plane.intersect(&ray, Interval::from_min(0.001)).is_none());
    }

    #[test]
    fn test_plane_behind_origin_misses() {
        let plane = Plane::new(Vec3::ZERO, Vec3::Y);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Y);
        assert!(plane.intersect(&ray, Interval::from_min(0.001)).is_none());
    }

    #[test]
    fn test_one_sided_plane() {
        let plane = Plane::new(Vec3::ZERO, Vec3::Y).one_sided();

        let from_above = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert!(plane.intersect(&from_above, Interval::from_min(0.001)).is_some());

        let from_below = Ray::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y);
        assert!(plane.intersect(&from_below, Interval::from_min(0.001)).is_none());
    }

    #[test]
    fn test_plane_is_open() {
        assert!(!Plane::new(Vec3::ZERO, Vec3::Y).is_closed());
    }
}
