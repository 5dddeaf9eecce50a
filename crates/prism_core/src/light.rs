//! Light sources.
//!
//! Shading asks a light two things about a surface point: which way the
//! light is and how far away, and what colour arrives. Both answers come
//! back together in a [`LightSample`].

use crate::Color;
use prism_math::Vec3;

/// What a light contributes at one surface point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSample {
    /// Unit vector from the surface point toward the light
    pub direction: Vec3,
    /// Distance to the light along `direction`; infinite for distant lights
    pub distance: f32,
    /// Colour/intensity arriving at the point
    pub color: Color,
}

/// A light source that can illuminate surface points.
pub trait Light: Send + Sync {
    /// Sample this light as seen from `point`.
    fn illuminate(&self, point: Vec3) -> LightSample;

    /// Nominal colour/intensity of the light.
    fn color(&self) -> Color;
}

/// An omnidirectional light at a position, without distance falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    position: Vec3,
    color: Color,
}

impl PointLight {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self { position, color }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }
}

impl Light for PointLight {
    fn illuminate(&self, point: Vec3) -> LightSample {
        let to_light = self.position - point;
        let distance = to_light.length();
        LightSample {
            direction: to_light.normalize_or_zero(),
            distance,
            color: self.color,
        }
    }

    fn color(&self) -> Color {
        self.color
    }
}

/// A light infinitely far away, shining along `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Direction the light travels (from the light into the scene)
    direction: Vec3,
    color: Color,
}

impl DirectionalLight {
    pub fn new(direction: Vec3, color: Color) -> Self {
        Self {
            direction: direction.normalize(),
            color,
        }
    }
}

impl Light for DirectionalLight {
    fn illuminate(&self, _point: Vec3) -> LightSample {
        LightSample {
            direction: -self.direction,
            distance: f32::INFINITY,
            color: self.color,
        }
    }

    fn color(&self) -> Color {
        self.color
    }
}
