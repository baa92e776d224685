//! Board Compositor
//!
//! Filters the engine's layers by visibility, styles each visible layer and
//! stacks the fragments in engine order. Stack order is the engine's
//! responsibility; nothing here reorders layers. When the bottom side is
//! active the whole stack is rotated 180 degrees, never individual layers.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::controls::ControlPanel;
use super::styler::{style_with, ColorScheme, StyledFragment};
use crate::config::{CanvasConfig, ViewerConfig};
use crate::layers::{classify, GroupKind, Layer, LayerGroups, RenderResult, Side};
use crate::state::VisibilityStore;
use crate::svg::escape_attribute;

/// User input routed back into the visibility store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "target", rename_all = "snake_case")]
pub enum UiEvent {
    ToggleLayer(String),
    ToggleGroup(GroupKind),
    SwitchSide(Side),
}

/// Composited board: styled fragments bottom-most first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    pub side: Side,
    /// Rotate the whole stack 180 degrees
    pub mirrored: bool,
    /// Canvas color behind the stack for the active side
    pub background: String,
    /// Engine board outline extent `[x, y, width, height]`
    pub view_box: Option<[f64; 4]>,
    pub fragments: Vec<StyledFragment>,
}

impl BoardView {
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Fragment ids in stack order
    pub fn layer_ids(&self) -> Vec<&str> {
        self.fragments.iter().map(|f| f.layer_id.as_str()).collect()
    }

    /// CSS aspect ratio of the board outline, when the engine reported one
    pub fn aspect_ratio(&self) -> Option<f64> {
        let [_, _, width, height] = self.view_box?;
        (width > 0.0 && height > 0.0).then(|| width / height)
    }

    /// Render the stack as one HTML block.
    ///
    /// Every fragment is absolutely positioned over the full canvas so
    /// layers share one coordinate frame regardless of their own size.
    pub fn to_html(&self, canvas: &CanvasConfig) -> String {
        let mut html = String::new();
        let aspect = match self.aspect_ratio() {
            Some(ratio) => format!(" aspect-ratio: {:.4};", ratio),
            None => String::new(),
        };
        let transform = if self.mirrored {
            " transform: rotate(180deg);"
        } else {
            ""
        };
        let _ = write!(
            html,
            "<div class=\"board {}\" style=\"position: relative; min-width: {}px; min-height: {}px; background: {};{}{}\">",
            self.side,
            canvas.min_width,
            canvas.min_height,
            escape_attribute(&self.background),
            aspect,
            transform
        );

        if self.fragments.is_empty() {
            html.push_str("<p class=\"empty\">Nothing to show</p>");
        }
        for fragment in &self.fragments {
            let _ = write!(
                html,
                "<div class=\"layer\" data-layer-id=\"{}\" style=\"position: absolute; inset: 0; pointer-events: none;\">{}</div>",
                escape_attribute(&fragment.layer_id),
                fragment.markup
            );
        }
        html.push_str("</div>");
        html
    }
}

/// Compose the visible layers of `result` in engine order.
///
/// Layers without a rendered document are skipped.
pub fn compose(
    result: &RenderResult,
    visibility: &VisibilityStore,
    scheme: ColorScheme,
) -> Vec<StyledFragment> {
    result
        .layers
        .iter()
        .filter(|layer| visibility.is_visible(&layer.id))
        .filter_map(|layer| match result.render(&layer.id) {
            Some(document) => Some(style_with(layer, document, scheme)),
            None => {
                tracing::warn!(layer = %layer.id, "no rendered document for visible layer");
                None
            }
        })
        .collect()
}

/// One loaded board: engine result, its display groups and visibility
#[derive(Debug, Clone)]
pub struct BoardCompositor {
    result: RenderResult,
    visibility: VisibilityStore,
    scheme: ColorScheme,
    canvas: CanvasConfig,
}

impl BoardCompositor {
    /// Classify and seed a fresh board from an engine result
    pub fn new(result: RenderResult, config: &ViewerConfig) -> Self {
        let groups = classify(&result.layers);
        let visibility = VisibilityStore::seed(&result.layers, &groups);
        Self {
            result,
            visibility,
            scheme: config.color_scheme,
            canvas: config.canvas.clone(),
        }
    }

    /// Apply one UI event
    pub fn handle(&mut self, event: UiEvent) {
        tracing::debug!(?event, "handling ui event");
        match event {
            UiEvent::ToggleLayer(id) => {
                self.visibility.toggle_layer(&id);
            }
            UiEvent::ToggleGroup(kind) => {
                self.visibility.toggle_group_kind(kind);
            }
            UiEvent::SwitchSide(side) => self.visibility.switch_side(side),
        }
    }

    /// Composite the currently visible layers
    pub fn view(&self) -> BoardView {
        let side = self.visibility.active_side();
        BoardView {
            side,
            mirrored: side == Side::Bottom,
            background: self.canvas.background(side).to_string(),
            view_box: self.result.board_view_box,
            fragments: compose(&self.result, &self.visibility, self.scheme),
        }
    }

    /// Toggle controls reflecting the current visibility
    pub fn controls(&self) -> ControlPanel {
        ControlPanel::build(&self.visibility)
    }

    pub fn set_scheme(&mut self, scheme: ColorScheme) {
        self.scheme = scheme;
    }

    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    pub fn layers(&self) -> &[Layer] {
        &self.result.layers
    }

    pub fn groups(&self) -> &LayerGroups {
        self.visibility.groups()
    }

    pub fn result(&self) -> &RenderResult {
        &self.result
    }

    pub fn visibility(&self) -> &VisibilityStore {
        &self.visibility
    }

    pub fn visibility_mut(&mut self) -> &mut VisibilityStore {
        &mut self.visibility
    }
}
