//! Layer Data Model
//!
//! Layers are produced by the external Gerber engine and are read-only to
//! the core. A result set pairs the layer list with one rendered vector
//! document per layer id.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::io::Read;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{LayerstackError, Result};
use crate::svg::SvgNode;

/// Manufacturing function of a layer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LayerType {
    Copper,
    Silkscreen,
    Soldermask,
    Solderpaste,
    Outline,
    Drill,
    /// Any engine-defined type the core has no special handling for
    Other(String),
}

impl LayerType {
    pub fn as_str(&self) -> &str {
        match self {
            LayerType::Copper => "copper",
            LayerType::Silkscreen => "silkscreen",
            LayerType::Soldermask => "soldermask",
            LayerType::Solderpaste => "solderpaste",
            LayerType::Outline => "outline",
            LayerType::Drill => "drill",
            LayerType::Other(name) => name,
        }
    }

    /// Board-wide types shown regardless of the active side
    pub fn is_board_wide(&self) -> bool {
        matches!(self, LayerType::Outline | LayerType::Drill)
    }
}

impl From<String> for LayerType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "copper" => LayerType::Copper,
            "silkscreen" => LayerType::Silkscreen,
            "soldermask" => LayerType::Soldermask,
            "solderpaste" => LayerType::Solderpaste,
            "outline" => LayerType::Outline,
            "drill" => LayerType::Drill,
            _ => LayerType::Other(value),
        }
    }
}

impl From<&str> for LayerType {
    fn from(value: &str) -> Self {
        LayerType::from(value.to_string())
    }
}

impl From<LayerType> for String {
    fn from(value: LayerType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical side of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Top,
    Bottom,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Bottom => "bottom",
        }
    }

    /// The side seen when the board is flipped over
    pub fn opposite(&self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top" => Ok(Side::Top),
            "bottom" => Ok(Side::Bottom),
            other => Err(format!("unknown side '{}' (expected top or bottom)", other)),
        }
    }
}

/// One decoded fabrication layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    /// Unique within a result set
    pub id: String,
    /// `None` when the engine could not identify the file
    #[serde(rename = "type", default)]
    pub layer_type: Option<LayerType>,
    /// `None` for inner and board-wide layers
    #[serde(default, deserialize_with = "deserialize_side")]
    pub side: Option<Side>,
    #[serde(default)]
    pub filename: String,
}

impl Layer {
    pub fn new(
        id: impl Into<String>,
        layer_type: impl Into<LayerType>,
        side: Option<Side>,
    ) -> Self {
        let id = id.into();
        Self {
            filename: id.clone(),
            id,
            layer_type: Some(layer_type.into()),
            side,
        }
    }

    /// Attach the source filename
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Type name used for CSS classes and labels
    pub fn type_name(&self) -> &str {
        self.layer_type
            .as_ref()
            .map(LayerType::as_str)
            .unwrap_or("unknown")
    }

    pub fn is_type(&self, layer_type: &LayerType) -> bool {
        self.layer_type.as_ref() == Some(layer_type)
    }
}

/// Engines also report `inner` or `all` for layers without a physical side;
/// only `top` and `bottom` count as a side.
fn deserialize_side<'de, D>(deserializer: D) -> std::result::Result<Option<Side>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

#[derive(Debug, Clone, Default, Deserialize)]
struct BoardShapeRender {
    #[serde(rename = "viewBox", default)]
    view_box: Option<[f64; 4]>,
}

/// Output of one engine conversion: ordered layers plus their documents
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResult {
    /// Physical stack order, bottom-most first
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub renders_by_id: HashMap<String, SvgNode>,
    #[serde(default, rename = "boardShapeRender", deserialize_with = "deserialize_board_view_box")]
    pub board_view_box: Option<[f64; 4]>,
}

fn deserialize_board_view_box<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<[f64; 4]>, D::Error>
where
    D: Deserializer<'de>,
{
    let shape: Option<BoardShapeRender> = Option::deserialize(deserializer)?;
    Ok(shape.and_then(|s| s.view_box))
}

impl RenderResult {
    /// An empty result set
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a result from layers and their rendered documents
    pub fn new(layers: Vec<Layer>, renders_by_id: HashMap<String, SvgNode>) -> Self {
        Self {
            layers,
            renders_by_id,
            board_view_box: None,
        }
    }

    /// Parse and validate an engine result from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let result: RenderResult = serde_json::from_str(json)?;
        result.validate()?;
        Ok(result)
    }

    /// Parse and validate an engine result from a reader
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let result: RenderResult = serde_json::from_reader(reader)?;
        result.validate()?;
        Ok(result)
    }

    /// Reject result sets whose layer ids are not unique
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for layer in &self.layers {
            if !seen.insert(layer.id.as_str()) {
                return Err(LayerstackError::DuplicateLayerId {
                    id: layer.id.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn render(&self, id: &str) -> Option<&SvgNode> {
        self.renders_by_id.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }
}
