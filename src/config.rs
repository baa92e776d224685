//! Viewer Configuration
//!
//! Presentation settings stored as JSON. Every field has a default, so a
//! partial file (or no file at all) is valid.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LayerstackError, Result};
use crate::layers::Side;
use crate::render::ColorScheme;

/// Size and background of the shared canvas all layers are stacked on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Minimum canvas width in CSS pixels
    pub min_width: u32,
    /// Minimum canvas height in CSS pixels
    pub min_height: u32,
    pub top_background: String,
    pub bottom_background: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_width: 710,
            min_height: 450,
            top_background: "#464646".to_string(),
            bottom_background: "#184913".to_string(),
        }
    }
}

impl CanvasConfig {
    /// Background color behind the stack when `side` is active
    pub fn background(&self, side: Side) -> &str {
        match side {
            Side::Top => &self.top_background,
            Side::Bottom => &self.bottom_background,
        }
    }
}

/// Viewer presentation settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub color_scheme: ColorScheme,
    pub canvas: CanvasConfig,
}

impl ViewerConfig {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LayerstackError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        let config: ViewerConfig =
            serde_json::from_str(&content).map_err(|e| LayerstackError::Config {
                reason: format!("{}: {}", path.display(), e),
            })?;
        tracing::debug!(path = %path.display(), scheme = %config.color_scheme, "loaded viewer config");
        Ok(config)
    }

    /// Load settings if a path is given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
