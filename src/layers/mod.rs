//! Layer Model Module
//!
//! Engine result types and the classifier that sorts layers into display
//! groups:
//! - Common: outline, drill and anything unclaimed
//! - Top / Bottom: layers with a physical side
//! - Inner: copper without a side

mod classifier;
mod layer;

pub use classifier::{classify, GroupKind, LayerGroups};
pub use layer::{Layer, LayerType, RenderResult, Side};
