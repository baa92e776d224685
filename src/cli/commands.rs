//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use log::{info, warn};

use crate::config::ViewerConfig;
use crate::error::{LayerstackError, Result};
use crate::layers::{GroupKind, RenderResult, Side};
use crate::render::{BoardCompositor, ColorScheme, UiEvent};
use crate::state::Session;
use crate::svg::escape_text;

/// Read an engine result from disk.
pub fn read_result(path: &Path) -> Result<RenderResult> {
    if !path.exists() {
        return Err(LayerstackError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path)?;
    RenderResult::from_reader(BufReader::new(file)).map_err(|e| match e {
        LayerstackError::Serialization(source) => {
            LayerstackError::ingestion(format!("{}: {}", path.display(), source))
        }
        other => other,
    })
}

/// Load an engine result into a fresh session.
fn open_board(path: &Path, config: ViewerConfig) -> Result<BoardCompositor> {
    let result = read_result(path)?;

    let mut session = Session::new(config);
    session.load_with(|| Ok(result));
    if let Some(message) = session.status().error() {
        return Err(LayerstackError::ingestion(message));
    }

    let board = session
        .board()
        .cloned()
        .ok_or_else(|| LayerstackError::ingestion("engine produced no board"))?;
    if board.layers().is_empty() {
        warn!("{} contains no layers", path.display());
    }
    Ok(board)
}

/// Events in application order: the side switch first (it resets
/// visibility), then group toggles, then single-layer toggles.
pub fn events_for(side: Option<Side>, groups: &[GroupKind], layers: &[String]) -> Vec<UiEvent> {
    side.map(UiEvent::SwitchSide)
        .into_iter()
        .chain(groups.iter().copied().map(UiEvent::ToggleGroup))
        .chain(layers.iter().cloned().map(UiEvent::ToggleLayer))
        .collect()
}

/// Print the layer groups and their toggle state.
pub fn show_layers(path: &Path, side: Option<Side>, config: ViewerConfig) -> Result<()> {
    info!("Inspecting layers: {}", path.display());

    let mut board = open_board(path, config)?;
    if let Some(side) = side {
        board.handle(UiEvent::SwitchSide(side));
    }

    if board.layers().is_empty() {
        println!("Nothing to show.");
        return Ok(());
    }

    println!("Layers: {}", board.layers().len());
    println!("{:-<60}", "");
    print!("{}", board.controls());
    println!("{:-<60}", "");
    println!(
        "Visible: {} of {}",
        board.visibility().visible_count(),
        board.layers().len()
    );

    Ok(())
}

/// Options for the render command
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub side: Option<Side>,
    pub toggle_groups: Vec<GroupKind>,
    pub toggles: Vec<String>,
    pub scheme: Option<ColorScheme>,
}

/// Composite an engine result into a standalone HTML page.
pub fn render_board(path: &Path, options: &RenderOptions, config: ViewerConfig) -> Result<String> {
    info!("Rendering board: {}", path.display());

    let canvas = config.canvas.clone();
    let mut board = open_board(path, config)?;
    if let Some(scheme) = options.scheme {
        board.set_scheme(scheme);
    }

    for event in events_for(options.side, &options.toggle_groups, &options.toggles) {
        if let UiEvent::ToggleLayer(id) = &event {
            if board.result().layer(id).is_none() {
                warn!("No layer with id '{}'; toggle ignored", id);
            }
        }
        board.handle(event);
    }

    let view = board.view();
    info!(
        "Composited {} layer(s), side {}, scheme {}",
        view.fragments.len(),
        view.side,
        board.scheme()
    );

    let title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("board");
    Ok(html_document(title, &view.to_html(&canvas)))
}

/// Render and write to `output`, or stdout when no output is given.
pub fn render(
    path: &Path,
    options: &RenderOptions,
    output: Option<&Path>,
    config: ViewerConfig,
) -> Result<()> {
    let html = render_board(path, options, config)?;
    match output {
        Some(output) => {
            fs::write(output, html)?;
            println!("Board written: {}", output.display());
        }
        None => println!("{}", html),
    }
    Ok(())
}

/// Write a configuration file with default settings.
pub fn init_config(path: &Path) -> Result<()> {
    info!("Writing default configuration: {}", path.display());

    ViewerConfig::default().save(path)?;
    println!("Configuration written: {}", path.display());

    Ok(())
}

fn html_document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_text(title),
        body
    )
}
