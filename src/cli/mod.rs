//! CLI Module
//!
//! Command-line interface for inspecting engine results.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::layers::{GroupKind, Side};
use crate::render::ColorScheme;

/// Layerstack - PCB fabrication layer viewer
#[derive(Parser, Debug)]
#[command(name = "layerstack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Viewer configuration file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the layer groups and toggle state of an engine result
    #[command(name = "layers")]
    Layers {
        /// Engine result JSON (`layers` + `rendersById`)
        result: PathBuf,

        /// Active board side
        #[arg(long)]
        side: Option<Side>,
    },

    /// Composite an engine result into an HTML board view
    #[command(name = "render")]
    Render {
        /// Engine result JSON (`layers` + `rendersById`)
        result: PathBuf,

        /// Active board side (applied first; resets visibility)
        #[arg(long)]
        side: Option<Side>,

        /// Toggle a display group: top, bottom, inner or common (repeatable)
        #[arg(long = "toggle-group")]
        toggle_groups: Vec<GroupKind>,

        /// Toggle a single layer by id (repeatable)
        #[arg(long = "toggle")]
        toggles: Vec<String>,

        /// Palette: original, bw or bw-invert
        #[arg(long)]
        scheme: Option<ColorScheme>,

        /// Output HTML file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a configuration file with default settings
    #[command(name = "init-config")]
    InitConfig {
        /// Path for the new configuration file
        path: PathBuf,
    },
}
