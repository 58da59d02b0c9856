mod demo;
mod logging;
mod renderer;
mod theme;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use paintflash_core::PaintflashConfig;
use tracing::info;

/// Flash terminal components as they re-render, colored by render cost.
#[derive(Parser, Debug)]
#[command(name = "paintflash", author, version, about, long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(short, long, env = "PAINTFLASH_CONFIG")]
    config: Option<PathBuf>,

    /// How long a highlight stays on screen, overriding the config
    #[arg(long, value_name = "MS")]
    display_ms: Option<u64>,

    /// Log file; defaults to one in the temp directory
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Where `s` saves the current overlay frame
    #[arg(long, default_value = "paintflash-frame.svg")]
    svg_out: PathBuf,

    /// Render random components on a timer
    #[arg(short, long)]
    autoplay: bool,

    /// Seed for simulated render costs
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log = logging::init(cli.log_file.clone())?;
    let config = load_config(&cli)?;
    info!(
        log_file = %log.log_file.display(),
        display_ms = config.display_duration_ms,
        "starting paintflash"
    );

    renderer::run(
        &config,
        renderer::Options {
            svg_out: cli.svg_out,
            autoplay: cli.autoplay,
            seed: cli.seed,
        },
    )
}

fn load_config(cli: &Cli) -> Result<PaintflashConfig> {
    let mut config = match &cli.config {
        Some(path) => PaintflashConfig::load(path)?,
        None => PaintflashConfig::default(),
    };
    if let Some(ms) = cli.display_ms {
        config.display_duration_ms = ms;
        config.validate().context("--display-ms")?;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_ms_overrides_default() {
        let cli = Cli::parse_from(["paintflash", "--display-ms", "300"]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.display_duration_ms, 300);
    }

    #[test]
    fn zero_display_ms_is_rejected() {
        let cli = Cli::parse_from(["paintflash", "--display-ms", "0"]);
        assert!(load_config(&cli).is_err());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::parse_from(["paintflash", "--config", "/nonexistent/paintflash.json"]);
        let err = load_config(&cli).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/paintflash.json"));
    }
}
