//! # Sonance Probe
//!
//! Loads a TOML scene and prints the gain each source gets on each output
//! channel, one row per source channel.
//!
//! ```text
//! sonance-probe [scene.toml]          evaluate a scene (demo scene if absent)
//! sonance-probe --init [scene.toml]   write the demo scene to disk
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod config;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{SceneConfig, SCENE_FILE};
use crate::report::evaluate_scene;

/// Main entry point.
fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("sonance=info".parse()?))
        .init();

    let mut args = std::env::args().skip(1).peekable();
    let init = args.next_if(|arg| arg == "--init").is_some();
    let path = args.next().map_or_else(|| PathBuf::from(SCENE_FILE), PathBuf::from);

    if init {
        SceneConfig::default()
            .save_to(&path)
            .with_context(|| format!("writing demo scene to {}", path.display()))?;
        return Ok(());
    }

    let scene = SceneConfig::load_from(&path)?;
    info!(
        "Evaluating {} sources against {} output channels",
        scene.sources.len(),
        scene.channels.len()
    );

    let pans: Vec<String> = scene.channels.iter().map(|c| format!("{:>6.2}", c.pan)).collect();
    println!("{:<16} {:<10} {}", "source", "kind", pans.join(" "));
    for report in evaluate_scene(&scene) {
        println!("{report}");
    }

    Ok(())
}
