use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use prism_renderer::ImageFormat;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Output file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// PNG, 8 bits per channel
    Png,
    /// Binary PPM (P6)
    Ppm,
    /// ASCII PPM (P3)
    PpmAscii,
}

impl From<OutputFormat> for ImageFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Ppm => ImageFormat::PpmBinary,
            OutputFormat::PpmAscii => ImageFormat::PpmAscii,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "prism")]
#[command(about = "A recursive Whitted-style ray tracer")]
pub struct Args {
    /// JSON scene description; renders a built-in demo scene when omitted
    pub scene: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// Output file path, or `-` for standard output
    #[arg(short, long, default_value = "render.png")]
    pub output: String,

    /// Output format; guessed from the output extension when omitted
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Reflection/refraction bounce budget, overriding the scene file
    #[arg(long)]
    pub max_ref: Option<u32>,

    /// Apply gamma 2.0 when converting to 8-bit
    #[arg(long)]
    pub gamma: bool,

    /// Trace image rows on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Format to write: explicit flag, then file extension, then PNG.
    pub fn image_format(&self) -> ImageFormat {
        self.format
            .map(ImageFormat::from)
            .or_else(|| ImageFormat::from_path(&self.output))
            .unwrap_or(ImageFormat::Png)
    }

    pub fn writes_to_stdout(&self) -> bool {
        self.output == "-"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["prism"]);
        assert!(args.scene.is_none());
        assert_eq!(args.width, 640);
        assert_eq!(args.height, 480);
        assert_eq!(args.output, "render.png");
        assert_eq!(args.max_ref, None);
        assert!(!args.gamma);
        assert_eq!(args.image_format(), ImageFormat::Png);
    }

    #[test]
    fn test_format_from_extension_and_flag() {
        let args = Args::parse_from(["prism", "scene.json", "-o", "out.ppm"]);
        assert_eq!(args.scene, Some(PathBuf::from("scene.json")));
        assert_eq!(args.image_format(), ImageFormat::PpmBinary);

        let args = Args::parse_from(["prism", "-o", "out.ppm", "--format", "ppm-ascii"]);
        assert_eq!(args.image_format(), ImageFormat::PpmAscii);
    }

    #[test]
    fn test_stdout_output() {
        let args = Args::parse_from(["prism", "-o", "-", "--format", "ppm"]);
        assert!(args.writes_to_stdout());
        assert_eq!(args.image_format(), ImageFormat::PpmBinary);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "prism",
            "--width",
            "32",
            "--height",
            "24",
            "--max-ref",
            "2",
            "--gamma",
            "--log-level",
            "debug",
        ]);
        assert_eq!((args.width, args.height), (32, 24));
        assert_eq!(args.max_ref, Some(2));
        assert!(args.gamma);
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }
}
