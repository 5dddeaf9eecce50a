//! Recursive Whitted-style tracing.
//!
//! Every call resolves one ray segment: find what it hits, shade that point
//! with direct light, then spend the remaining bounce budget on a mirror
//! reflection and a refracted ray. Each level decrements the budget, so the
//! recursion depth never exceeds the budget the caller started with.

use prism_core::{Color, Material, Scene};
use prism_math::{Ray, Vec3};

use crate::intersect::{find_nearest, Intersection};
use crate::optics::{reflect, refract, transmittance};
use crate::renderer::RenderConfig;
use crate::shading::local_illumination;

/// The medium a ray is travelling through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Medium {
    /// Index of refraction
    pub ior: f32,
    /// Beer's-law absorption per unit distance
    pub absorbance: f32,
}

impl Medium {
    /// Empty space: no bending, no absorption.
    pub const VACUUM: Medium = Medium {
        ior: 1.0,
        absorbance: 0.0,
    };

    pub fn new(ior: f32, absorbance: f32) -> Self {
        Self { ior, absorbance }
    }

    /// The inside of an object made of `material`.
    pub fn of(material: &Material) -> Self {
        Self::new(material.ior, material.absorbance)
    }
}

impl Default for Medium {
    fn default() -> Self {
        Self::VACUUM
    }
}

/// Everything a ray inherits from the path that spawned it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceState {
    /// Remaining reflection/refraction budget
    pub max_ref: u32,
    /// Medium the ray travels through
    pub medium: Medium,
    /// Product of the reflective/refractive weights along the path
    pub strength: Color,
    /// Optical depth accumulated along the path so far
    pub absorbance: f32,
}

impl TraceState {
    /// State of a camera ray: full strength, starting in vacuum.
    pub fn primary(max_ref: u32) -> Self {
        Self {
            max_ref,
            medium: Medium::VACUUM,
            strength: Color::ONE,
            absorbance: 0.0,
        }
    }

    /// Start the ray inside a different medium.
    pub fn in_medium(mut self, medium: Medium) -> Self {
        self.medium = medium;
        self
    }

    /// Optical depth once the ray has travelled `distance` further.
    fn absorbance_after(&self, distance: f32) -> f32 {
        // Checked first: 0 * inf would be NaN for rays escaping vacuum
        if self.medium.absorbance == 0.0 {
            self.absorbance
        } else {
            self.absorbance + self.medium.absorbance * distance
        }
    }
}

/// Compute the colour seen along `ray`.
///
/// The result already includes `state.strength` and the path's absorption,
/// so callers add branch results together without scaling them again.
pub fn trace(scene: &Scene, ray: &Ray, state: TraceState, config: &RenderConfig) -> Color {
    let Some(hit) = find_nearest(scene, ray) else {
        let absorbance = state.absorbance_after(f32::INFINITY);
        return config.background * state.strength * transmittance(absorbance);
    };

    // t is in units of the direction's length, which primary rays don't normalize
    let travelled = hit.t * ray.direction().length();
    let absorbance = state.absorbance_after(travelled);

    let weight = state.strength * transmittance(absorbance);
    let mut color = weight * local_illumination(scene, ray, &hit);

    let material = scene.material(hit.object.material());
    let budget = state.max_ref.min(material.max_ref);
    if budget == 0 || !material.is_recursive() {
        return color;
    }

    let direction = ray.direction().normalize();
    let next = TraceState {
        max_ref: budget - 1,
        absorbance,
        ..state
    };

    if material.reflective > 0.0 {
        let strength = state.strength * material.reflective;
        if worth_tracing(strength, absorbance, config) {
            let reflected = Ray::new(hit.point, reflect(direction, hit.normal));
            color += trace(scene, &reflected, TraceState { strength, ..next }, config);
        }
    }

    if material.refractive > 0.0 {
        let strength = state.strength * material.refractive;
        if worth_tracing(strength, absorbance, config) {
            let closed = scene.entity(hit.object.entity()).is_closed();
            let (transmitted, medium) =
                transmit(&hit, material, direction, state.medium, closed);
            color += trace(
                scene,
                &transmitted,
                TraceState {
                    strength,
                    medium,
                    ..next
                },
                config,
            );
        }
    }

    color
}

/// Ray and medium for the refracted branch at `hit`.
///
/// Entering a front face moves into the material; leaving through a back
/// face returns to vacuum. On total internal reflection the branch becomes
/// a mirror reflection that stays in the current medium.
///
/// Open surfaces have no inside: the ray crosses them undeviated and stays
/// in the current medium.
fn transmit(
    hit: &Intersection<'_>,
    material: &Material,
    direction: Vec3,
    current: Medium,
    closed: bool,
) -> (Ray, Medium) {
    if !closed {
        // Bending in and straight back out of a zero-thickness sheet cancels
        return (Ray::new(hit.point, direction), current);
    }

    let (eta, beyond) = if hit.front_face {
        (current.ior / material.ior, Medium::of(material))
    } else {
        (current.ior / Medium::VACUUM.ior, Medium::VACUUM)
    };

    match refract(direction, hit.normal, eta) {
        Some(refracted) => (Ray::new(hit.point, refracted), beyond),
        None => {
            log::trace!("total internal reflection at {:?}", hit.point);
            (Ray::new(hit.point, reflect(direction, hit.normal)), current)
        }
    }
}

fn worth_tracing(strength: Color, absorbance: f32, config: &RenderConfig) -> bool {
    (strength * transmittance(absorbance)).max_element() >= config.min_strength
}
