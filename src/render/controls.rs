//! Toggle control model
//!
//! Snapshot of the side selector, group checkboxes and per-layer
//! checkboxes, derived from the visibility store after every event.

use std::fmt;

use serde::Serialize;

use crate::layers::{GroupKind, Layer, Side};
use crate::state::{CheckState, VisibilityStore};

/// One per-layer checkbox
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerControl {
    pub id: String,
    pub label: String,
    pub checked: bool,
}

/// One group checkbox and its members
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupControl {
    pub kind: GroupKind,
    pub title: &'static str,
    pub state: CheckState,
    pub layers: Vec<LayerControl>,
}

/// Everything the toggle sidebar shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlPanel {
    pub active_side: Side,
    /// Non-empty groups only
    pub groups: Vec<GroupControl>,
}

/// Layers are labelled by type; untyped layers fall back to the file name
fn label(layer: &Layer) -> String {
    match &layer.layer_type {
        Some(layer_type) => layer_type.to_string(),
        None if !layer.filename.is_empty() => layer.filename.clone(),
        None => layer.id.clone(),
    }
}

impl ControlPanel {
    pub fn build(visibility: &VisibilityStore) -> Self {
        let groups = GroupKind::ALL
            .iter()
            .filter_map(|kind| {
                let members = visibility.groups().get(*kind);
                if members.is_empty() {
                    return None;
                }
                Some(GroupControl {
                    kind: *kind,
                    title: kind.title(),
                    state: visibility.group_checkbox_state(members),
                    layers: members
                        .iter()
                        .map(|layer| LayerControl {
                            id: layer.id.clone(),
                            label: label(layer),
                            checked: visibility.is_visible(&layer.id),
                        })
                        .collect(),
                })
            })
            .collect();

        Self {
            active_side: visibility.active_side(),
            groups,
        }
    }

    pub fn group(&self, kind: GroupKind) -> Option<&GroupControl> {
        self.groups.iter().find(|g| g.kind == kind)
    }
}

impl fmt::Display for ControlPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (top, bottom) = match self.active_side {
            Side::Top => ("(*)", "( )"),
            Side::Bottom => ("( )", "(*)"),
        };
        writeln!(f, "Side: {} Top  {} Bottom", top, bottom)?;
        for group in &self.groups {
            writeln!(f, "{} {}", group.state.marker(), group.title)?;
            for layer in &group.layers {
                let marker = if layer.checked { "[x]" } else { "[ ]" };
                writeln!(f, "    {} {} ({})", marker, layer.label, layer.id)?;
            }
        }
        Ok(())
    }
}
