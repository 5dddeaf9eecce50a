//! Surface colour lookup.
//!
//! Textures map a world-space hit point to the base colour of the surface.
//! Image textures are decoded once at load time into linear float pixels.

use std::path::Path;

use prism_math::Vec3;
use thiserror::Error;

use crate::Color;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Texture {0} has no pixels")]
    Empty(String),

    #[error("Texture scale must be positive, got {0}")]
    InvalidScale(f32),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// Base colour of a surface at a world-space point.
pub trait Texture: Send + Sync {
    fn color_at(&self, point: Vec3) -> Color;
}

/// The same colour everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidColor {
    color: Color,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Texture for SolidColor {
    fn color_at(&self, _point: Vec3) -> Color {
        self.color
    }
}

/// A 3-D checkerboard of unit cubes, `scale` world units on a side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Checker {
    scale: f32,
    even: Color,
    odd: Color,
}

impl Checker {
    pub fn new(scale: f32, even: Color, odd: Color) -> TextureResult<Self> {
        if scale.is_nan() || scale <= 0.0 {
            return Err(TextureError::InvalidScale(scale));
        }
        Ok(Self { scale, even, odd })
    }
}

impl Texture for Checker {
    fn color_at(&self, point: Vec3) -> Color {
        let cell = (point / self.scale).floor();
        let sum = cell.x as i64 + cell.y as i64 + cell.z as i64;
        if sum.rem_euclid(2) == 0 {
            self.even
        } else {
            self.odd
        }
    }
}

/// An image projected straight down onto the XZ plane and tiled.
///
/// One copy of the image covers `scale` x `scale` world units.
#[derive(Clone, Debug)]
pub struct ImageTexture {
    /// Texture width in pixels
    width: u32,
    /// Texture height in pixels
    height: u32,
    /// Pixel data in linear RGB, row-major order
    pixels: Vec<Color>,
    scale: f32,
}

impl ImageTexture {
    /// Load an image file and convert it to linear RGB.
    pub fn open(path: impl AsRef<Path>, scale: f32) -> TextureResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| TextureError::Load {
            path: path.display().to_string(),
            source,
        })?;

        let texture = Self::from_rgb(&img.to_rgb8(), scale).map_err(|err| match err {
            TextureError::Empty(_) => TextureError::Empty(path.display().to_string()),
            other => other,
        })?;

        log::debug!(
            "Loaded texture: {} ({}x{})",
            path.display(),
            texture.width,
            texture.height
        );

        Ok(texture)
    }

    /// Build a texture from an already decoded sRGB image.
    pub fn from_rgb(img: &image::RgbImage, scale: f32) -> TextureResult<Self> {
        if scale.is_nan() || scale <= 0.0 {
            return Err(TextureError::InvalidScale(scale));
        }
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::Empty("<memory>".to_string()));
        }

        let pixels = img
            .pixels()
            .map(|p| {
                Vec3::new(
                    srgb_to_linear(p[0]),
                    srgb_to_linear(p[1]),
                    srgb_to_linear(p[2]),
                )
            })
            .collect();

        Ok(Self {
            width,
            height,
            pixels,
            scale,
        })
    }

    /// Sample the texture at UV coordinates (bilinear filtering).
    ///
    /// UV coordinates wrap, with (0, 0) at the bottom-left of the image.
    pub fn sample(&self, u: f32, v: f32) -> Color {
        let u = u.rem_euclid(1.0);
        let v = v.rem_euclid(1.0);

        // Convert to pixel coordinates
        let x = u * (self.width as f32 - 1.0);
        let y = (1.0 - v) * (self.height as f32 - 1.0); // Flip V for image coordinates

        let x0 = x.floor() as u32;
        let y0 = y.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let fx = x.fract();
        let fy = y.fract();

        let top = self.pixel(x0, y0).lerp(self.pixel(x1, y0), fx);
        let bottom = self.pixel(x0, y1).lerp(self.pixel(x1, y1), fx);
        top.lerp(bottom, fy)
    }

    fn pixel(&self, x: u32, y: u32) -> Color {
        let idx = (y * self.width + x) as usize;
        self.pixels.get(idx).copied().unwrap_or(Vec3::ZERO)
    }
}

impl Texture for ImageTexture {
    fn color_at(&self, point: Vec3) -> Color {
        self.sample(point.x / self.scale, point.z / self.scale)
    }
}

/// Convert sRGB byte value to linear float.
fn srgb_to_linear(value: u8) -> f32 {
    let v = value as f32 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color() {
        let tex = SolidColor::new(Vec3::new(1.0, 0.5, 0.0));
        assert_eq!(tex.color_at(Vec3::ZERO), Vec3::new(1.0, 0.5, 0.0));
        assert_eq!(tex.color_at(Vec3::splat(100.0)), Vec3::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn test_checker_alternates() {
        let tex = Checker::new(1.0, Vec3::ONE, Vec3::ZERO).expect("valid scale");

        assert_eq!(tex.color_at(Vec3::new(0.5, 0.5, 0.5)), Vec3::ONE);
        assert_eq!(tex.color_at(Vec3::new(1.5, 0.5, 0.5)), Vec3::ZERO);
        assert_eq!(tex.color_at(Vec3::new(1.5, 1.5, 0.5)), Vec3::ONE);
        // Negative coordinates keep alternating across the origin
        assert_eq!(tex.color_at(Vec3::new(-0.5, 0.5, 0.5)), Vec3::ZERO);
    }

    #[test]
    fn test_checker_rejects_bad_scale() {
        assert!(matches!(
            Checker::new(0.0, Vec3::ONE, Vec3::ZERO),
            Err(TextureError::InvalidScale(_))
        ));
    }

    #[test]
    fn test_image_texture_sampling() {
        // 2x1 image: black on the left, white on the right
        let mut img = image::RgbImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgb([0, 0, 0]));
        img.put_pixel(1, 0, image::Rgb([255, 255, 255]));
        let tex = ImageTexture::from_rgb(&img, 2.0).expect("valid image");

        assert!(tex.sample(0.0, 0.5).length() < 1e-6);
        assert!((tex.sample(0.999, 0.5) - Vec3::ONE).length() < 0.01);

        // Planar projection: x / scale is u
        let mid = tex.color_at(Vec3::new(1.0, 7.0, 0.0));
        assert!((mid.x - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_image_texture_rejects_empty() {
        let img = image::RgbImage::new(0, 0);
        assert!(matches!(
            ImageTexture::from_rgb(&img, 1.0),
            Err(TextureError::Empty(_))
        ));
    }

    #[test]
    fn test_srgb_to_linear() {
        assert!((srgb_to_linear(0) - 0.0).abs() < 0.001);
        assert!((srgb_to_linear(255) - 1.0).abs() < 0.001);

        // Mid-gray is darker in linear
        let mid = srgb_to_linear(128);
        assert!(mid < 0.5);
        assert!(mid > 0.1);
    }
}
