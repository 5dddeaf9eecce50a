//! Prism Core - scene data model for the Prism ray tracer.
//!
//! This crate provides:
//!
//! - **Surface description**: [`Material`] coefficients and [`Texture`] lookups
//! - **Geometry**: the [`Entity`] capability and the [`Sphere`], [`Plane`] and
//!   [`Triangle`] primitives
//! - **Lights**: the [`Light`] capability with point and directional lights
//! - **Scene arena**: [`Scene`] owns every entity, material, texture and light;
//!   [`Object`]s tie them together through lightweight handles
//! - **Scene files**: JSON scene description loading
//!
//! # Example
//!
//! ```ignore
//! use prism_core::{Material, PointLight, Scene, SolidColor, Sphere, Vec3};
//!
//! let mut scene = Scene::new(0.1);
//! let ball = scene.add_entity(Sphere::new(Vec3::ZERO, 1.0));
//! let matte = scene.add_material(Material::default().with_ambient(0.1))?;
//! let white = scene.add_texture(SolidColor::new(Vec3::ONE));
//! scene.add_object(ball, matte, white)?;
//! scene.add_light(PointLight::new(Vec3::new(0.0, 10.0, 0.0), Vec3::ONE));
//! ```

pub mod entity;
pub mod light;
pub mod loader;
pub mod material;
pub mod plane;
pub mod scene;
pub mod sphere;
pub mod texture;
pub mod triangle;

/// Linear RGB color.
pub type Color = prism_math::Vec3;

// Re-export commonly used types
pub use entity::{Entity, SurfaceHit};
pub use light::{DirectionalLight, Light, LightSample, PointLight};
pub use loader::{load_scene, load_scene_from_str, LoadError, LoadedScene, View};
pub use material::{Material, MaterialError};
pub use plane::Plane;
pub use prism_math::{Interval, Ray, Vec3};
pub use scene::{EntityId, MaterialId, Object, ObjectId, Scene, SceneError, TextureId};
pub use sphere::Sphere;
pub use texture::{Checker, ImageTexture, SolidColor, Texture, TextureError};
pub use triangle::Triangle;
