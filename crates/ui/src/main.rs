use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use paintflash_core::PaintflashConfig;
use tracing_subscriber::EnvFilter;

/// Desktop demo of the paintflash render-highlight overlay.
#[derive(Parser, Debug)]
#[command(name = "paintflash-gui", author, version, about, long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(short, long, env = "PAINTFLASH_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("PAINTFLASH_LOG")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match &cli.config {
        Some(path) => PaintflashConfig::load(path)?,
        None => PaintflashConfig::default(),
    };
    paintflash_ui::run_native(config)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("running the egui host")
}
