//! Surface material coefficients.
//!
//! A [`Material`] is a plain record of Phong-style weights plus the
//! parameters that drive mirror reflection and refraction with absorption.

use serde::Deserialize;
use thiserror::Error;

/// Errors raised when a material fails its construction preconditions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MaterialError {
    #[error("material field `{field}` must be finite and non-negative, got {value}")]
    NegativeWeight { field: &'static str, value: f32 },

    #[error("index of refraction must be finite and positive, got {0}")]
    InvalidIor(f32),

    #[error("specular exponent must be non-negative, got {0}")]
    InvalidReflectivity(i32),
}

/// How light interacts with a surface.
///
/// Weights are independent: nothing requires
/// `ambient + diffuse + specular + reflective + refractive` to equal one.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Weight of the scene-wide ambient term
    pub ambient: f32,
    /// Weight of the Lambertian term
    pub diffuse: f32,
    /// Weight of the Phong highlight
    pub specular: f32,
    /// Phong exponent; larger is a tighter highlight
    pub reflectivity: i32,
    /// Weight of the mirror-reflected ray
    pub reflective: f32,
    /// Per-material cap on reflection/refraction depth below this surface
    pub max_ref: u32,
    /// Weight of the transmitted ray
    pub refractive: f32,
    /// Index of refraction (1.0 = vacuum)
    pub ior: f32,
    /// Beer's-law attenuation per unit distance travelled inside the volume
    pub absorbance: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: 0.0,
            diffuse: 1.0,
            specular: 0.0,
            reflectivity: 20,
            reflective: 0.0,
            max_ref: 5,
            refractive: 0.0,
            ior: 1.0,
            absorbance: 0.15,
        }
    }
}

impl Material {
    /// A purely diffuse material with the given ambient and diffuse weights.
    pub fn matte(ambient: f32, diffuse: f32) -> Self {
        Self {
            ambient,
            diffuse,
            ..Default::default()
        }
    }

    /// A perfect mirror: all light comes from the reflected ray.
    pub fn mirror() -> Self {
        Self {
            diffuse: 0.0,
            reflective: 1.0,
            ..Default::default()
        }
    }

    /// Clear glass-like material with the given index of refraction.
    pub fn glass(ior: f32) -> Self {
        Self {
            diffuse: 0.0,
            specular: 0.5,
            reflective: 0.1,
            refractive: 0.9,
            ior,
            ..Default::default()
        }
    }

    pub fn with_ambient(mut self, ambient: f32) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_diffuse(mut self, diffuse: f32) -> Self {
        self.diffuse = diffuse;
        self
    }

    /// Set the highlight weight and its exponent.
    pub fn with_specular(mut self, specular: f32, reflectivity: i32) -> Self {
        self.specular = specular;
        self.reflectivity = reflectivity;
        self
    }

    pub fn with_reflective(mut self, reflective: f32) -> Self {
        self.reflective = reflective;
        self
    }

    /// Set the transmitted weight, index of refraction and absorbance together.
    pub fn with_refraction(mut self, refractive: f32, ior: f32, absorbance: f32) -> Self {
        self.refractive = refractive;
        self.ior = ior;
        self.absorbance = absorbance;
        self
    }

    pub fn with_max_ref(mut self, max_ref: u32) -> Self {
        self.max_ref = max_ref;
        self
    }

    /// Whether this material spawns any secondary rays.
    pub fn is_recursive(&self) -> bool {
        self.max_ref > 0 && (self.reflective > 0.0 || self.refractive > 0.0)
    }

    /// Check the construction preconditions.
    ///
    /// The tracer assumes these hold and does not re-check them per ray.
    pub fn validate(&self) -> Result<(), MaterialError> {
        let weights = [
            ("ambient", self.ambient),
            ("diffuse", self.diffuse),
            ("specular", self.specular),
            ("reflective", self.reflective),
            ("refractive", self.refractive),
            ("absorbance", self.absorbance),
        ];
        for (field, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(MaterialError::NegativeWeight { field, value });
            }
        }

        if !self.ior.is_finite() || self.ior <= 0.0 {
            return Err(MaterialError::InvalidIor(self.ior));
        }

        if self.reflectivity < 0 {
            return Err(MaterialError::InvalidReflectivity(self.reflectivity));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_material() {
        let m = Material::default();
        assert_eq!(m.ambient, 0.0);
        assert_eq!(m.diffuse, 1.0);
        assert_eq!(m.reflectivity, 20);
        assert_eq!(m.max_ref, 5);
        assert_eq!(m.ior, 1.0);
        assert!((m.absorbance - 0.15).abs() < 1e-6);
        assert!(m.validate().is_ok());
        assert!(!m.is_recursive());
    }

    #[test]
    fn test_builders() {
        let m = Material::matte(0.1, 0.9)
            .with_specular(0.3, 50)
            .with_reflective(0.2)
            .with_refraction(0.5, 1.33, 0.0)
            .with_max_ref(3);

        assert_eq!(m.ambient, 0.1);
        assert_eq!(m.diffuse, 0.9);
        assert_eq!(m.specular, 0.3);
        assert_eq!(m.reflectivity, 50);
        assert_eq!(m.reflective, 0.2);
        assert_eq!(m.refractive, 0.5);
        assert_eq!(m.ior, 1.33);
        assert_eq!(m.absorbance, 0.0);
        assert_eq!(m.max_ref, 3);
        assert!(m.is_recursive());
    }

    #[test]
    fn test_weights_need_not_sum_to_one() {
        let m = Material::matte(1.0, 1.0).with_specular(1.0, 10).with_reflective(1.0);
        assert!(m.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_ior() {
        let m = Material::glass(0.0);
        assert_eq!(m.validate(), Err(MaterialError::InvalidIor(0.0)));

        let m = Material::glass(-1.5);
        assert!(matches!(m.validate(), Err(MaterialError::InvalidIor(_))));
    }

    #[test]
    fn test_rejects_negative_weight() {
        let m = Material::matte(-0.1, 1.0);
        assert_eq!(
            m.validate(),
            Err(MaterialError::NegativeWeight {
                field: "ambient",
                value: -0.1
            })
        );

        let m = Material::default().with_reflective(f32::NAN);
        assert!(matches!(
            m.validate(),
            Err(MaterialError::NegativeWeight { field: "reflective", .. })
        ));
    }

    #[test]
    fn test_rejects_negative_exponent() {
        let m = Material::default().with_specular(0.5, -2);
        assert_eq!(m.validate(), Err(MaterialError::InvalidReflectivity(-2)));
    }

    #[test]
    fn test_mirror_without_budget_is_not_recursive() {
        assert!(Material::mirror().is_recursive());
        assert!(!Material::mirror().with_max_ref(0).is_recursive());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let m: Material = serde_json::from_str(r#"{ "ambient": 0.2, "reflective": 0.5 }"#)
            .expect("valid material json");
        assert_eq!(m.ambient, 0.2);
        assert_eq!(m.reflective, 0.5);
        assert_eq!(m.diffuse, 1.0);
        assert_eq!(m.max_ref, 5);
    }
}
