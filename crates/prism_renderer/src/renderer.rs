//! Render loop and image buffer.
//!
//! One primary ray per pixel. `render` traces row by row on the calling
//! thread; `render_parallel` hands whole rows to rayon.

use std::time::Instant;

use prism_core::{Color, Scene};
use rayon::prelude::*;

use crate::camera::Camera;
use crate::tracer::{trace, TraceState};

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Global reflection/refraction bounce budget
    pub max_ref: u32,
    /// Colour returned by rays that hit nothing
    pub background: Color,
    /// Branches whose weight drops below this are not traced; `0.0` traces
    /// every branch the bounce budget allows
    pub min_strength: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_ref: 5,
            background: Color::ZERO,
            min_strength: 1e-3,
        }
    }
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width as usize) * (height as usize)],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let idx = self.index(x, y);
        self.pixels[idx] = color;
    }

    /// Convert to row-major 8-bit RGB triples.
    pub fn to_rgb8(&self, gamma: bool) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color, gamma));
        }
        bytes
    }

    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear colour to 8-bit RGB, clamping out-of-range channels.
pub fn color_to_rgb(color: Color, gamma: bool) -> [u8; 3] {
    let encode = |c: f32| {
        let c = if gamma { linear_to_gamma(c) } else { c };
        (255.0 * c.clamp(0.0, 1.0)).round() as u8
    };
    [encode(color.x), encode(color.y), encode(color.z)]
}

/// Trace the primary ray of one pixel.
pub fn render_pixel(scene: &Scene, camera: &Camera, x: u32, y: u32, config: &RenderConfig) -> Color {
    let ray = camera.get_ray(x, y);
    trace(scene, &ray, TraceState::primary(config.max_ref), config)
}

/// Render the entire scene to a new image buffer.
///
/// The scene is only read; each pixel is written exactly once.
pub fn render(scene: &Scene, camera: &Camera, config: &RenderConfig) -> ImageBuffer {
    let (width, height) = (camera.image_width, camera.image_height);
    let mut image = ImageBuffer::new(width, height);
    log_start(scene, camera, config);

    let start = Instant::now();
    for y in 0..height {
        for x in 0..width {
            let color = render_pixel(scene, camera, x, y, config);
            image.set(x, y, color);
        }
        log::debug!("Row {}/{} done", y + 1, height);
    }

    log::info!("Rendered in {:.2?}", start.elapsed());
    image
}

/// Render the entire scene, tracing rows concurrently.
///
/// Each worker owns a disjoint row of the buffer, so the result is
/// identical to [`render`].
pub fn render_parallel(scene: &Scene, camera: &Camera, config: &RenderConfig) -> ImageBuffer {
    let (width, height) = (camera.image_width, camera.image_height);
    let mut image = ImageBuffer::new(width, height);
    log_start(scene, camera, config);

    let start = Instant::now();
    if width > 0 {
        image
            .pixels
            .par_chunks_mut(width as usize)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, pixel) in row.iter_mut().enumerate() {
                    *pixel = render_pixel(scene, camera, x as u32, y as u32, config);
                }
            });
    }

    log::info!(
        "Rendered in {:.2?} on {} threads",
        start.elapsed(),
        rayon::current_num_threads()
    );
    image
}

fn log_start(scene: &Scene, camera: &Camera, config: &RenderConfig) {
    log::info!(
        "Rendering {}x{} (max_ref {}, {} objects, {} lights)",
        camera.image_width,
        camera.image_height,
        config.max_ref,
        scene.object_count(),
        scene.light_count()
    );
    if scene.light_count() == 0 {
        log::warn!("Scene has no lights; only ambient and background will show");
    }
}
