//! JSON scene description loading.
//!
//! A scene file names its materials and textures once and refers to them
//! by name from each object:
//!
//! ```json
//! {
//!   "ambient": 0.1,
//!   "view": { "look_from": [0, 2, 6], "look_at": [0, 0, 0] },
//!   "max_ref": 5,
//!   "materials": { "matte": { "ambient": 0.1, "diffuse": 0.9 } },
//!   "textures": { "white": { "type": "solid", "color": [1, 1, 1] } },
//!   "lights": [ { "type": "point", "position": [0, 10, 0], "color": [1, 1, 1] } ],
//!   "objects": [
//!     { "shape": { "type": "sphere", "center": [0, 0, 0], "radius": 1 },
//!       "material": "matte", "texture": "white" }
//!   ]
//! }
//! ```
//!
//! Image texture paths are resolved relative to the scene file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use prism_math::Vec3;
use serde::Deserialize;
use thiserror::Error;

use crate::light::{DirectionalLight, PointLight};
use crate::material::Material;
use crate::plane::Plane;
use crate::scene::{MaterialId, Scene, SceneError, TextureId};
use crate::sphere::Sphere;
use crate::texture::{Checker, ImageTexture, SolidColor, TextureError};
use crate::triangle::Triangle;
use crate::Color;

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed scene description: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Texture(#[from] TextureError),

    #[error("Object {object} refers to unknown material `{name}`")]
    UnknownMaterial { object: usize, name: String },

    #[error("Object {object} refers to unknown texture `{name}`")]
    UnknownTexture { object: usize, name: String },

    #[error("Object {object} has invalid geometry: {reason}")]
    InvalidShape { object: usize, reason: &'static str },
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Where the camera sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
}

impl Default for View {
    fn default() -> Self {
        Self {
            look_from: Vec3::new(0.0, 0.0, 5.0),
            look_at: Vec3::ZERO,
            up: Vec3::Y,
            vfov: 60.0,
        }
    }
}

/// A scene ready to render, plus the render settings its file asked for.
pub struct LoadedScene {
    pub scene: Scene,
    pub view: View,
    /// Bounce budget requested by the file, if any
    pub max_ref: Option<u32>,
    /// Background colour requested by the file, if any
    pub background: Option<Color>,
}

/// Load a scene description from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<LoadedScene> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let loaded = build(serde_json::from_str(&source)?, base_dir)?;

    log::info!(
        "Loaded scene {}: {} objects, {} lights",
        path.display(),
        loaded.scene.object_count(),
        loaded.scene.light_count()
    );
    Ok(loaded)
}

/// Load a scene description from a JSON string.
///
/// Relative image paths resolve against the current directory.
pub fn load_scene_from_str(source: &str) -> LoadResult<LoadedScene> {
    build(serde_json::from_str(source)?, Path::new("."))
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneFile {
    #[serde(default)]
    ambient: f32,
    #[serde(default)]
    view: Option<ViewDesc>,
    #[serde(default)]
    max_ref: Option<u32>,
    #[serde(default)]
    background: Option<[f32; 3]>,
    #[serde(default)]
    materials: HashMap<String, Material>,
    #[serde(default)]
    textures: HashMap<String, TextureDesc>,
    #[serde(default)]
    lights: Vec<LightDesc>,
    #[serde(default)]
    objects: Vec<ObjectDesc>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ViewDesc {
    look_from: [f32; 3],
    #[serde(default)]
    look_at: [f32; 3],
    #[serde(default = "default_up")]
    up: [f32; 3],
    #[serde(default = "default_vfov")]
    vfov: f32,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum TextureDesc {
    Solid {
        color: [f32; 3],
    },
    Checker {
        #[serde(default = "default_scale")]
        scale: f32,
        even: [f32; 3],
        odd: [f32; 3],
    },
    Image {
        path: PathBuf,
        #[serde(default = "default_scale")]
        scale: f32,
    },
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum LightDesc {
    Point { position: [f32; 3], color: [f32; 3] },
    Directional { direction: [f32; 3], color: [f32; 3] },
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ShapeDesc {
    Sphere {
        center: [f32; 3],
        radius: f32,
    },
    Plane {
        point: [f32; 3],
        normal: [f32; 3],
        #[serde(default)]
        one_sided: bool,
    },
    Triangle {
        vertices: [[f32; 3]; 3],
    },
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ObjectDesc {
    shape: ShapeDesc,
    #[serde(default)]
    material: Option<String>,
    #[serde(default)]
    texture: Option<String>,
    #[serde(default = "default_shadows")]
    shadows: bool,
}

fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

fn default_vfov() -> f32 {
    View::default().vfov
}

fn default_scale() -> f32 {
    1.0
}

fn default_shadows() -> bool {
    true
}

fn build(file: SceneFile, base_dir: &Path) -> LoadResult<LoadedScene> {
    let mut scene = Scene::new(file.ambient);

    let mut materials: HashMap<String, MaterialId> = HashMap::new();
    for (name, material) in file.materials {
        let id = scene.add_material(material)?;
        materials.insert(name, id);
    }

    let mut textures: HashMap<String, TextureId> = HashMap::new();
    for (name, desc) in file.textures {
        let id = match desc {
            TextureDesc::Solid { color } => scene.add_texture(SolidColor::new(color.into())),
            TextureDesc::Checker { scale, even, odd } => {
                scene.add_texture(Checker::new(scale, even.into(), odd.into())?)
            }
            TextureDesc::Image { path, scale } => {
                let full_path = if path.is_absolute() {
                    path
                } else {
                    base_dir.join(path)
                };
                scene.add_texture(ImageTexture::open(full_path, scale)?)
            }
        };
        textures.insert(name, id);
    }

    for light in file.lights {
        match light {
            LightDesc::Point { position, color } => {
                scene.add_light(PointLight::new(position.into(), color.into()))
            }
            LightDesc::Directional { direction, color } => {
                if Vec3::from(direction).length_squared() == 0.0 {
                    log::warn!("Skipping directional light with zero direction");
                    continue;
                }
                scene.add_light(DirectionalLight::new(direction.into(), color.into()))
            }
        }
    }

    // Objects without a material or texture share one lazily created default
    let mut fallback_material = None;
    let mut fallback_texture = None;

    for (index, desc) in file.objects.into_iter().enumerate() {
        let material = match desc.material {
            Some(name) => *materials
                .get(&name)
                .ok_or(LoadError::UnknownMaterial { object: index, name })?,
            None => match fallback_material {
                Some(id) => id,
                None => *fallback_material.insert(scene.add_material(Material::default())?),
            },
        };

        let texture = match desc.texture {
            Some(name) => *textures
                .get(&name)
                .ok_or(LoadError::UnknownTexture { object: index, name })?,
            None => *fallback_texture
                .get_or_insert_with(|| scene.add_texture(SolidColor::new(Vec3::ONE))),
        };

        let entity = match desc.shape {
            ShapeDesc::Sphere { center, radius } => {
                if radius.is_nan() || radius <= 0.0 {
                    return Err(LoadError::InvalidShape {
                        object: index,
                        reason: "sphere radius must be positive",
                    });
                }
                scene.add_entity(Sphere::new(center.into(), radius))
            }
            ShapeDesc::Plane {
                point,
                normal,
                one_sided,
            } => {
                if Vec3::from(normal).length_squared() == 0.0 {
                    return Err(LoadError::InvalidShape {
                        object: index,
                        reason: "plane normal must be non-zero",
                    });
                }
                let plane = Plane::new(point.into(), normal.into());
                scene.add_entity(if one_sided { plane.one_sided() } else { plane })
            }
            ShapeDesc::Triangle { vertices: [a, b, c] } => {
                let triangle = Triangle::new(a.into(), b.into(), c.into());
                if triangle.normal() == Vec3::ZERO {
                    return Err(LoadError::InvalidShape {
                        object: index,
                        reason: "triangle vertices are collinear",
                    });
                }
                scene.add_entity(triangle)
            }
        };

        scene.add_object_with_shadows(entity, material, texture, desc.shadows)?;
    }

    let view = file
        .view
        .map(|v| View {
            look_from: v.look_from.into(),
            look_at: v.look_at.into(),
            up: v.up.into(),
            vfov: v.vfov,
        })
        .unwrap_or_default();

    Ok(LoadedScene {
        scene,
        view,
        max_ref: file.max_ref,
        background: file.background.map(Vec3::from),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &str = r#"{
        "ambient": 0.1,
        "view": { "look_from": [0, 5, 0], "up": [0, 0, 1], "vfov": 40 },
        "max_ref": 3,
        "background": [0.1, 0.2, 0.3],
        "materials": {
            "matte": { "ambient": 0.1, "diffuse": 0.9 },
            "glass": { "diffuse": 0, "refractive": 0.9, "ior": 1.5 }
        },
        "textures": {
            "white": { "type": "solid", "color": [1, 1, 1] },
            "floor": { "type": "checker", "scale": 2, "even": [1, 1, 1], "odd": [0, 0, 0] }
        },
        "lights": [
            { "type": "point", "position": [0, 10, 0], "color": [1, 1, 1] },
            { "type": "directional", "direction": [0, -1, 0], "color": [0.2, 0.2, 0.2] }
        ],
        "objects": [
            { "shape": { "type": "sphere", "center": [0, 0, 0], "radius": 1 },
              "material": "matte", "texture": "white" },
            { "shape": { "type": "plane", "point": [0, -1, 0], "normal": [0, 1, 0] },
              "material": "matte", "texture": "floor", "shadows": false },
            { "shape": { "type": "triangle", "vertices": [[0, 0, 0], [1, 0, 0], [0, 1, 0]] } }
        ]
    }"#;

    #[test]
    fn test_load_simple_scene() {
        let loaded = load_scene_from_str(SIMPLE).expect("scene should load");

        assert_eq!(loaded.scene.ambient, 0.1);
        assert_eq!(loaded.scene.object_count(), 3);
        assert_eq!(loaded.scene.light_count(), 2);
        assert_eq!(loaded.max_ref, Some(3));
        assert_eq!(loaded.background, Some(Vec3::new(0.1, 0.2, 0.3)));

        assert_eq!(loaded.view.look_from, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(loaded.view.look_at, Vec3::ZERO);
        assert_eq!(loaded.view.up, Vec3::Z);
        assert_eq!(loaded.view.vfov, 40.0);

        let objects = loaded.scene.objects();
        assert!(objects[0].have_shadows());
        assert!(!objects[1].have_shadows());
        assert_eq!(loaded.scene.material(objects[0].material()).diffuse, 0.9);

        // The triangle falls back to the default material and a white texture
        let fallback = loaded.scene.material(objects[2].material());
        assert_eq!(*fallback, Material::default());
        assert_eq!(
            loaded.scene.texture(objects[2].texture()).color_at(Vec3::ZERO),
            Vec3::ONE
        );
    }

    #[test]
    fn test_defaults_for_empty_scene() {
        let loaded = load_scene_from_str("{}").expect("empty scene is valid");
        assert!(loaded.scene.is_empty());
        assert_eq!(loaded.view, View::default());
        assert_eq!(loaded.max_ref, None);
        assert_eq!(loaded.background, None);
    }

    #[test]
    fn test_unknown_material() {
        let source = r#"{ "objects": [
            { "shape": { "type": "sphere", "center": [0, 0, 0], "radius": 1 }, "material": "gold" }
        ] }"#;
        match load_scene_from_str(source) {
            Err(LoadError::UnknownMaterial { object, name }) => {
                assert_eq!(object, 0);
                assert_eq!(name, "gold");
            }
            other => panic!("expected UnknownMaterial, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_invalid_material_rejected() {
        let source = r#"{ "materials": { "bad": { "ior": 0 } } }"#;
        assert!(matches!(
            load_scene_from_str(source),
            Err(LoadError::Scene(SceneError::Material(_)))
        ));
    }

    #[test]
    fn test_invalid_sphere_rejected() {
        let source = r#"{ "objects": [
            { "shape": { "type": "sphere", "center": [0, 0, 0], "radius": 0 } }
        ] }"#;
        assert!(matches!(
            load_scene_from_str(source),
            Err(LoadError::InvalidShape { object: 0, .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            load_scene_from_str("{ \"ambient\": "),
            Err(LoadError::Parse(_))
        ));
        assert!(matches!(
            load_scene_from_str(r#"{ "ambiant": 0.1 }"#),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = load_scene("definitely/not/a/scene.json");
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_bundled_demo_scene_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/spheres.json");
        let loaded = load_scene(&path).expect("bundled scene should load");

        assert_eq!(loaded.scene.object_count(), 4);
        assert_eq!(loaded.scene.light_count(), 2);
        assert!(!loaded.scene.objects()[3].have_shadows());
        assert_eq!(loaded.max_ref, Some(5));
    }
}
