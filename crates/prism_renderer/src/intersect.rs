//! Nearest-hit search and shadow rays.

use prism_core::{LightSample, Object, Scene, SurfaceHit};
use prism_math::{Interval, Ray, Vec3};

/// Hits closer than this along a ray are ignored.
///
/// Secondary rays start exactly on a surface; without the bias they would
/// immediately re-hit it at t ≈ 0 and shadow themselves.
pub const SELF_HIT_EPSILON: f32 = 1e-3;

/// The closest surface a ray hits.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    /// Point of intersection
    pub point: Vec3,
    /// Unit surface normal, always facing against the ray
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the outside of the surface
    pub front_face: bool,
    /// Object owning the surface, for material and texture lookup
    pub object: &'a Object,
}

impl<'a> Intersection<'a> {
    fn new(ray: &Ray, hit: SurfaceHit, object: &'a Object) -> Self {
        // If the ray and normal point in the same direction, we're inside
        let front_face = ray.direction().dot(hit.normal) < 0.0;

        Self {
            point: hit.point,
            normal: if front_face { hit.normal } else { -hit.normal },
            t: hit.t,
            front_face,
            object,
        }
    }
}

/// Find the nearest object hit by `ray`, if any.
///
/// Every object is tested; the search window shrinks to the closest hit so
/// far. On an exact tie the object added to the scene first wins.
pub fn find_nearest<'a>(scene: &'a Scene, ray: &Ray) -> Option<Intersection<'a>> {
    let mut ray_t = Interval::from_min(SELF_HIT_EPSILON);
    let mut nearest = None;

    for object in scene.objects() {
        if let Some(hit) = scene.entity(object.entity()).intersect(ray, ray_t) {
            ray_t = ray_t.with_max(hit.t);
            nearest = Some((hit, object));
        }
    }

    nearest.map(|(hit, object)| Intersection::new(ray, hit, object))
}

/// Whether any shadow-casting object blocks `sample`'s light from `point`.
///
/// Stops at the first blocker. Objects with shadows disabled are skipped,
/// as is anything beyond the light itself.
pub fn is_occluded(scene: &Scene, point: Vec3, sample: &LightSample) -> bool {
    if sample.distance <= SELF_HIT_EPSILON {
        return false;
    }

    let shadow_ray = Ray::normalized(point, sample.direction);
    let ray_t = Interval::new(SELF_HIT_EPSILON, sample.distance);

    scene
        .objects()
        .iter()
        .filter(|object| object.have_shadows())
        .any(|object| {
            scene
                .entity(object.entity())
                .intersect(&shadow_ray, ray_t)
                .is_some()
        })
}
