//! Entity trait for ray-geometry intersection.

use prism_math::{Interval, Ray, Vec3};

/// Where a ray meets a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Unit surface normal pointing out of the shape, independent of the ray
    pub normal: Vec3,
}

/// Geometry that can be hit by rays.
///
/// Implementations report only hits whose `t` lies strictly inside `ray_t`.
/// Material, texture and shadow behaviour live on the owning object, not here.
pub trait Entity: Send + Sync {
    /// Test if a ray hits this entity within the given interval.
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit>;

    /// Whether the surface bounds a volume a ray can travel inside.
    ///
    /// Open surfaces have no thickness: a transmitted ray never ends up
    /// inside them.
    fn is_closed(&self) -> bool {
        true
    }
}

impl<E: Entity + ?Sized> Entity for Box<E> {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        (**self).intersect(ray, ray_t)
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}
