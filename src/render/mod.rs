//! Rendering Module
//!
//! Styles per-layer documents and composites them into one board view.

mod compositor;
mod controls;
mod styler;

pub use compositor::{compose, BoardCompositor, BoardView, UiEvent};
pub use controls::{ControlPanel, GroupControl, LayerControl};
pub use styler::{class_token, style, style_with, ColorScheme, LayerStyle, StyledFragment};
