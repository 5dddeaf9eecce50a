//! Scene arena and objects.
//!
//! The [`Scene`] owns every entity, material, texture and light. An
//! [`Object`] binds one of each of the first three together through typed
//! handles, so objects stay small and copyable and nothing borrows across
//! the arena. Nothing is ever removed, which keeps every handle valid for
//! the lifetime of the scene. Handles remember the scene that issued them,
//! so one from another scene is rejected instead of aliasing.

use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

use crate::entity::Entity;
use crate::light::Light;
use crate::material::{Material, MaterialError};
use crate::texture::Texture;

/// Errors raised while building a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("invalid material: {0}")]
    Material(#[from] MaterialError),

    #[error("{kind} handle {index} belongs to a different scene")]
    ForeignHandle { kind: &'static str, index: usize },
}

pub type SceneResult<T> = Result<T, SceneError>;

static NEXT_SCENE_ID: AtomicU64 = AtomicU64::new(0);

/// Handle to an entity stored in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId {
    scene: u64,
    index: usize,
}

/// Handle to a material stored in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId {
    scene: u64,
    index: usize,
}

/// Handle to a texture stored in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId {
    scene: u64,
    index: usize,
}

/// Handle to an object stored in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId {
    scene: u64,
    index: usize,
}

/// One renderable thing: geometry, surface material and colour lookup.
///
/// Objects are created by [`Scene::add_object`] and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Object {
    entity: EntityId,
    material: MaterialId,
    texture: TextureId,
    have_shadows: bool,
}

impl Object {
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }

    pub fn texture(&self) -> TextureId {
        self.texture
    }

    /// Whether this object blocks light from reaching other surfaces.
    pub fn have_shadows(&self) -> bool {
        self.have_shadows
    }
}

/// A complete scene: the arena, the lights, the objects and the global
/// ambient level.
///
/// Built incrementally, then only read while rendering.
pub struct Scene {
    id: u64,
    entities: Vec<Box<dyn Entity>>,
    materials: Vec<Material>,
    textures: Vec<Box<dyn Texture>>,
    lights: Vec<Box<dyn Light>>,
    objects: Vec<Object>,

    /// Ambient light level applied uniformly to every surface
    pub ambient: f32,
}

impl Scene {
    /// Create an empty scene with the given ambient level.
    pub fn new(ambient: f32) -> Self {
        Self {
            id: NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed),
            entities: Vec::new(),
            materials: Vec::new(),
            textures: Vec::new(),
            lights: Vec::new(),
            objects: Vec::new(),
            ambient,
        }
    }

    /// Store a piece of geometry and return its handle.
    pub fn add_entity(&mut self, entity: impl Entity + 'static) -> EntityId {
        self.entities.push(Box::new(entity));
        EntityId {
            scene: self.id,
            index: self.entities.len() - 1,
        }
    }

    /// Validate and store a material, returning its handle.
    pub fn add_material(&mut self, material: Material) -> SceneResult<MaterialId> {
        material.validate()?;
        self.materials.push(material);
        Ok(MaterialId {
            scene: self.id,
            index: self.materials.len() - 1,
        })
    }

    /// Store a texture and return its handle.
    pub fn add_texture(&mut self, texture: impl Texture + 'static) -> TextureId {
        self.textures.push(Box::new(texture));
        TextureId {
            scene: self.id,
            index: self.textures.len() - 1,
        }
    }

    /// Add a light source.
    pub fn add_light(&mut self, light: impl Light + 'static) {
        self.lights.push(Box::new(light));
    }

    /// Add a shadow-casting object.
    pub fn add_object(
        &mut self,
        entity: EntityId,
        material: MaterialId,
        texture: TextureId,
    ) -> SceneResult<ObjectId> {
        self.add_object_with_shadows(entity, material, texture, true)
    }

    /// Add an object, choosing whether it casts shadows.
    pub fn add_object_with_shadows(
        &mut self,
        entity: EntityId,
        material: MaterialId,
        texture: TextureId,
        have_shadows: bool,
    ) -> SceneResult<ObjectId> {
        self.check_handle("entity", entity.scene, entity.index)?;
        self.check_handle("material", material.scene, material.index)?;
        self.check_handle("texture", texture.scene, texture.index)?;

        self.objects.push(Object {
            entity,
            material,
            texture,
            have_shadows,
        });
        Ok(ObjectId {
            scene: self.id,
            index: self.objects.len() - 1,
        })
    }

    /// All objects, in insertion order.
    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// All lights, in insertion order.
    pub fn lights(&self) -> impl Iterator<Item = &dyn Light> {
        self.lights.iter().map(|light| light.as_ref())
    }

    /// The object behind `id`, or `None` if another scene issued it.
    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        if id.scene != self.id {
            return None;
        }
        self.objects.get(id.index)
    }

    /// Geometry of a handle issued by this scene.
    ///
    /// Panics if `id` came from a different scene.
    pub fn entity(&self, id: EntityId) -> &dyn Entity {
        self.assert_owned("entity", id.scene);
        self.entities[id.index].as_ref()
    }

    /// Material of a handle issued by this scene.
    ///
    /// Panics if `id` came from a different scene.
    pub fn material(&self, id: MaterialId) -> &Material {
        self.assert_owned("material", id.scene);
        &self.materials[id.index]
    }

    /// Texture of a handle issued by this scene.
    ///
    /// Panics if `id` came from a different scene.
    pub fn texture(&self, id: TextureId) -> &dyn Texture {
        self.assert_owned("texture", id.scene);
        self.textures[id.index].as_ref()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    // Handles are only issued by `add_*` and nothing is removed, so a handle
    // tagged with this scene is always in range.
    fn check_handle(&self, kind: &'static str, scene: u64, index: usize) -> SceneResult<()> {
        if scene == self.id {
            Ok(())
        } else {
            Err(SceneError::ForeignHandle { kind, index })
        }
    }

    fn assert_owned(&self, kind: &str, scene: u64) {
        assert!(scene == self.id, "{kind} handle from a different scene");
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(0.0)
    }
}
