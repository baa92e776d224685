//! Layerstack CLI - PCB Layer Viewer
//!
//! Command-line interface for classifying and compositing engine results.

use anyhow::Context;
use clap::Parser;
use log::info;
use tracing_subscriber::EnvFilter;

use layerstack::cli::commands::{self, RenderOptions};
use layerstack::cli::{Cli, Commands};
use layerstack::ViewerConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG overrides the default level
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Layerstack v{}", env!("CARGO_PKG_VERSION"));

    let config = ViewerConfig::load_or_default(cli.config.as_deref())
        .context("failed to load viewer configuration")?;

    match cli.command {
        Some(cmd) => handle_command(cmd, config),
        None => {
            println!("Layerstack v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands, config: ViewerConfig) -> anyhow::Result<()> {
    match cmd {
        Commands::Layers { result, side } => commands::show_layers(&result, side, config)
            .with_context(|| format!("failed to inspect {}", result.display())),
        Commands::Render {
            result,
            side,
            toggle_groups,
            toggles,
            scheme,
            output,
        } => {
            let options = RenderOptions {
                side,
                toggle_groups,
                toggles,
                scheme,
            };
            commands::render(&result, &options, output.as_deref(), config)
                .with_context(|| format!("failed to render {}", result.display()))
        }
        Commands::InitConfig { path } => commands::init_config(&path)
            .with_context(|| format!("failed to write {}", path.display())),
    }
}
