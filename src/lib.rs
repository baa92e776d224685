//! Layerstack - PCB Layer Viewer Core
//!
//! Layerstack takes the layer set produced by an external Gerber engine and
//! turns it into an inspectable board:
//! 1. Classification - layers are sorted into common, top, bottom and inner groups
//! 2. Visibility - a side selector plus per-layer and per-group toggles
//! 3. Compositing - visible layers are styled and stacked in engine order
//!
//! # Architecture
//!
//! The engine result (`layers` plus one vector document per layer id) is
//! immutable once loaded. Each new upload derives fresh groups and fresh
//! visibility; nothing is merged across uploads.

pub mod cli;
pub mod config;
pub mod error;
pub mod layers;
pub mod render;
pub mod state;
pub mod svg;

pub use config::{CanvasConfig, ViewerConfig};
pub use error::{LayerstackError, Result};
pub use layers::{classify, GroupKind, Layer, LayerGroups, LayerType, RenderResult, Side};
pub use render::{style, BoardCompositor, BoardView, ColorScheme, StyledFragment, UiEvent};
pub use state::{CheckState, LoadOutcome, LoadStatus, Session, VisibilityStore};
