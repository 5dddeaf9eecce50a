//! Local (direct) illumination at a surface point.

use prism_core::{Color, Scene};
use prism_math::Ray;

use crate::intersect::{is_occluded, Intersection};
use crate::optics::reflect;

/// Colour of the surface at `hit` from direct light only.
///
/// The scene ambient term always applies. Each light that faces the surface
/// and is not blocked by a shadow-casting object adds a Lambertian diffuse
/// term tinted by the surface colour and a Phong highlight in the light's
/// own colour.
pub fn local_illumination(scene: &Scene, ray: &Ray, hit: &Intersection<'_>) -> Color {
    let material = scene.material(hit.object.material());
    let surface = scene.texture(hit.object.texture()).color_at(hit.point);

    let mut color = scene.ambient * material.ambient * surface;
    if material.diffuse <= 0.0 && material.specular <= 0.0 {
        return color;
    }

    let view = -ray.direction().normalize();

    for light in scene.lights() {
        let sample = light.illuminate(hit.point);

        let n_dot_l = hit.normal.dot(sample.direction);
        if n_dot_l <= 0.0 || is_occluded(scene, hit.point, &sample) {
            continue;
        }

        color += material.diffuse * n_dot_l * sample.color * surface;

        if material.specular > 0.0 {
            let r = reflect(-sample.direction, hit.normal);
            let r_dot_v = r.dot(view).max(0.0);
            color += material.specular * r_dot_v.powi(material.reflectivity) * sample.color;
        }
    }

    color
}
