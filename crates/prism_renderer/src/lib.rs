//! Prism Renderer - recursive Whitted-style ray tracing.
//!
//! Given a [`Scene`](prism_core::Scene), computes the colour seen along each
//! ray: ambient, Lambertian and Phong shading from every unshadowed light,
//! plus mirror reflection and refraction with Beer's-law absorption,
//! recursively up to a bounce budget.
//!
//! Deterministic: one primary ray per pixel, traced on the calling thread by
//! [`render`] or across rows by [`render_parallel`].

mod camera;
mod intersect;
mod optics;
mod output;
mod renderer;
mod shading;
mod tracer;

pub use camera::Camera;
pub use intersect::{find_nearest, is_occluded, Intersection, SELF_HIT_EPSILON};
pub use optics::{reflect, refract, transmittance};
pub use output::{save_image, write_image, ImageFormat, OutputError};
pub use renderer::{
    color_to_rgb, render, render_parallel, render_pixel, ImageBuffer, RenderConfig,
};
pub use shading::local_illumination;
pub use tracer::{trace, Medium, TraceState};

/// Re-export the scene types most callers need alongside the renderer
pub use prism_core::{Color, Scene};
pub use prism_math::{Ray, Vec3};
