//! Image file encoding.
//!
//! Writes an [`ImageBuffer`] as 8-bit RGB in one of three raster formats:
//! - PPM `P3` (ASCII samples)
//! - PPM `P6` (binary samples)
//! - PNG (via the `image` crate)

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use thiserror::Error;

use crate::renderer::ImageBuffer;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encode(#[from] image::ImageError),
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Raster format of a written image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// PPM with ASCII samples (`P3`)
    PpmAscii,
    /// PPM with binary samples (`P6`)
    PpmBinary,
    /// PNG, 8 bits per channel
    Png,
}

impl ImageFormat {
    /// Guess the format from a file extension (`.png`, `.ppm`).
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "ppm" | "pnm" => Some(Self::PpmBinary),
            _ => None,
        }
    }
}

/// Encode `image` into `writer`.
pub fn write_image<W: Write>(
    image: &ImageBuffer,
    format: ImageFormat,
    gamma: bool,
    mut writer: W,
) -> OutputResult<()> {
    let bytes = image.to_rgb8(gamma);

    match format {
        ImageFormat::PpmAscii => {
            writeln!(writer, "P3")?;
            writeln!(writer, "{} {}", image.width, image.height)?;
            writeln!(writer, "255")?;
            for rgb in bytes.chunks_exact(3) {
                writeln!(writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
            }
        }
        ImageFormat::PpmBinary => {
            write!(writer, "P6\n{} {}\n255\n", image.width, image.height)?;
            writer.write_all(&bytes)?;
        }
        ImageFormat::Png => {
            PngEncoder::new(&mut writer).write_image(
                &bytes,
                image.width,
                image.height,
                ColorType::Rgb8,
            )?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Encode `image` into a file, creating or truncating it.
pub fn save_image(
    image: &ImageBuffer,
    path: impl AsRef<Path>,
    format: ImageFormat,
    gamma: bool,
) -> OutputResult<()> {
    let path = path.as_ref();
    let writer = BufWriter::new(File::create(path)?);
    write_image(image, format, gamma, writer)?;

    log::info!("Saved {:?} image to {}", format, path.display());
    Ok(())
}
