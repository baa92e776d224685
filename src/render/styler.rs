//! Layer Styler
//!
//! Turns one layer's engine document into a classed, colored fragment. The
//! palette is a fixed mapping from layer type (and, for silkscreen, side) to
//! one color and opacity, applied as a single inline style on the root so
//! one declaration governs every shape in the layer. Geometry, view box and
//! coordinate system are never touched.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::layers::{Layer, LayerType, Side};
use crate::svg::{Decoration, SvgNode};

/// Color and opacity applied to a whole layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerStyle {
    pub color: &'static str,
    pub opacity: f32,
}

impl LayerStyle {
    pub const fn new(color: &'static str, opacity: f32) -> Self {
        Self { color, opacity }
    }

    /// Inline CSS declarations for the layer root
    pub fn css(&self) -> String {
        format!("color: {}; opacity: {}", self.color, self.opacity)
    }
}

/// Fixed palette presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColorScheme {
    /// Gray copper, green mask, white legend
    #[default]
    #[serde(rename = "original")]
    Original,
    /// White features on black
    #[serde(rename = "bw")]
    BlackWhite,
    /// Black features on white
    #[serde(rename = "bw-invert")]
    BlackWhiteInverted,
}

impl ColorScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::Original => "original",
            ColorScheme::BlackWhite => "bw",
            ColorScheme::BlackWhiteInverted => "bw-invert",
        }
    }

    /// Style for a layer of `layer_type` on `side`
    pub fn style_for(&self, layer_type: Option<&LayerType>, side: Option<Side>) -> LayerStyle {
        match self {
            ColorScheme::Original => match layer_type {
                Some(LayerType::Copper) => LayerStyle::new("#cccccc", 1.0),
                Some(LayerType::Silkscreen) if side == Some(Side::Bottom) => {
                    LayerStyle::new("#1a1a1a", 1.0)
                }
                Some(LayerType::Silkscreen) => LayerStyle::new("#ffffff", 1.0),
                Some(LayerType::Soldermask) => LayerStyle::new("#004200", 0.75),
                Some(LayerType::Solderpaste) => LayerStyle::new("#999999", 1.0),
                Some(LayerType::Outline) | Some(LayerType::Drill) => {
                    LayerStyle::new("#000000", 1.0)
                }
                Some(LayerType::Other(_)) | None => LayerStyle::new("#008000", 0.5),
            },
            ColorScheme::BlackWhite => match layer_type {
                Some(LayerType::Soldermask) => LayerStyle::new("#ffffff", 0.0),
                Some(LayerType::Outline) | Some(LayerType::Drill) => {
                    LayerStyle::new("#000000", 1.0)
                }
                Some(LayerType::Other(_)) | None => LayerStyle::new("#ffffff", 0.5),
                Some(_) => LayerStyle::new("#ffffff", 1.0),
            },
            ColorScheme::BlackWhiteInverted => match layer_type {
                Some(LayerType::Soldermask) => LayerStyle::new("#ffffff", 0.0),
                Some(LayerType::Outline) | Some(LayerType::Drill) => {
                    LayerStyle::new("#ffffff", 1.0)
                }
                Some(LayerType::Other(_)) | None => LayerStyle::new("#000000", 0.5),
                Some(_) => LayerStyle::new("#000000", 1.0),
            },
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "original" => Ok(ColorScheme::Original),
            "bw" => Ok(ColorScheme::BlackWhite),
            "bw-invert" => Ok(ColorScheme::BlackWhiteInverted),
            other => Err(format!(
                "unknown color scheme '{}' (expected original, bw or bw-invert)",
                other
            )),
        }
    }
}

/// A styled, serialized layer ready to be stacked
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledFragment {
    pub layer_id: String,
    /// `"<type> <side-or-common>"`
    pub class_name: String,
    pub style: LayerStyle,
    pub markup: String,
}

/// CSS class token for a layer: its type followed by its side or `common`
pub fn class_token(layer: &Layer) -> String {
    let side = layer.side.map(|s| s.as_str()).unwrap_or("common");
    format!("{} {}", layer.type_name(), side)
}

/// Style `document` for `layer` with the default palette
pub fn style(layer: &Layer, document: &SvgNode) -> StyledFragment {
    style_with(layer, document, ColorScheme::default())
}

/// Style `document` for `layer` with `scheme`.
///
/// The document is only borrowed: the class and style are merged into the
/// serialized output, so repeated passes never accumulate changes on the
/// engine's tree.
pub fn style_with(layer: &Layer, document: &SvgNode, scheme: ColorScheme) -> StyledFragment {
    let class_name = class_token(layer);
    let style = scheme.style_for(layer.layer_type.as_ref(), layer.side);
    let css = style.css();
    if document.root_element().is_none() {
        tracing::warn!(layer = %layer.id, "document has no root element; class and style not applied");
    }
    let markup = document.to_decorated_markup(&Decoration {
        class: &class_name,
        style: &css,
    });

    StyledFragment {
        layer_id: layer.id.clone(),
        class_name,
        style,
        markup,
    }
}
