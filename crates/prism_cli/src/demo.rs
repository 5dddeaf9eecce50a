//! Built-in demo scene, rendered when no scene file is given.
//!
//! A checkered floor with a matte, a mirror and a glass ball, a triangle
//! backdrop, and two lights.

use anyhow::Result;
use prism_core::{
    Checker, DirectionalLight, LoadedScene, Material, Plane, PointLight, Scene, SolidColor,
    Sphere, Triangle, Vec3, View,
};

pub fn build_scene() -> Result<LoadedScene> {
    let mut scene = Scene::new(0.15);

    let floor_tex = scene.add_texture(Checker::new(
        1.0,
        Vec3::new(0.9, 0.9, 0.9),
        Vec3::new(0.2, 0.2, 0.25),
    )?);
    let white = scene.add_texture(SolidColor::new(Vec3::ONE));
    let red = scene.add_texture(SolidColor::new(Vec3::new(0.8, 0.15, 0.1)));
    let teal = scene.add_texture(SolidColor::new(Vec3::new(0.1, 0.6, 0.6)));

    let floor_mat = scene.add_material(Material::matte(0.3, 0.8).with_reflective(0.15))?;
    let matte = scene.add_material(Material::matte(0.3, 0.7).with_specular(0.4, 30))?;
    let mirror = scene.add_material(Material::mirror().with_specular(0.6, 80))?;
    let glass = scene.add_material(Material::glass(1.5).with_specular(0.5, 60))?;

    let floor = scene.add_entity(Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y));
    scene.add_object(floor, floor_mat, floor_tex)?;

    let left = scene.add_entity(Sphere::new(Vec3::new(-2.2, 0.0, -1.0), 1.0));
    scene.add_object(left, matte, red)?;

    let middle = scene.add_entity(Sphere::new(Vec3::new(0.0, 0.0, -2.5), 1.0));
    scene.add_object(middle, mirror, white)?;

    // Glass should tint, not darken, what lies behind it
    let right = scene.add_entity(Sphere::new(Vec3::new(2.0, -0.2, 0.0), 0.8));
    scene.add_object_with_shadows(right, glass, white, false)?;

    let backdrop = scene.add_entity(Triangle::new(
        Vec3::new(-6.0, -1.0, -6.0),
        Vec3::new(6.0, -1.0, -6.0),
        Vec3::new(0.0, 5.0, -6.0),
    ));
    scene.add_object(backdrop, matte, teal)?;

    scene.add_light(PointLight::new(Vec3::new(-4.0, 6.0, 4.0), Vec3::new(0.8, 0.8, 0.8)));
    scene.add_light(DirectionalLight::new(
        Vec3::new(1.0, -1.0, -0.5),
        Vec3::new(0.3, 0.3, 0.35),
    ));

    Ok(LoadedScene {
        scene,
        view: View {
            look_from: Vec3::new(0.0, 1.5, 6.0),
            look_at: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            vfov: 50.0,
        },
        max_ref: Some(5),
        background: Some(Vec3::new(0.05, 0.05, 0.1)),
    })
}
