//! `prism`: render a scene description to an image file.

mod cli;
mod demo;
mod logger;

use std::io;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use prism_core::load_scene;
use prism_renderer::{
    render, render_parallel, save_image, write_image, Camera, RenderConfig,
};

use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_logger(args.log_level.into());

    ensure!(
        args.width > 0 && args.height > 0,
        "image size must be positive, got {}x{}",
        args.width,
        args.height
    );

    let loaded = match &args.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene file given; rendering the built-in demo scene");
            demo::build_scene().context("Failed to build the demo scene")?
        }
    };

    let defaults = RenderConfig::default();
    let config = RenderConfig {
        max_ref: args.max_ref.or(loaded.max_ref).unwrap_or(defaults.max_ref),
        background: loaded.background.unwrap_or(defaults.background),
        ..defaults
    };
    log::debug!("Render config: {:?}", config);

    let camera = Camera::from_view(&loaded.view, args.width, args.height);
    let image = if args.parallel {
        render_parallel(&loaded.scene, &camera, &config)
    } else {
        render(&loaded.scene, &camera, &config)
    };

    let format = args.image_format();
    if args.writes_to_stdout() {
        write_image(&image, format, args.gamma, io::stdout().lock())
            .context("Failed to write image to standard output")?;
    } else {
        save_image(&image, &args.output, format, args.gamma)
            .with_context(|| format!("Failed to write {}", args.output))?;
    }

    Ok(())
}
