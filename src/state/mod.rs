//! State Management Module
//!
//! Provides per-layer visibility with the side selector, and the load
//! session that guards against stale engine results.

pub mod session;
pub mod visibility;

pub use session::{LoadOutcome, LoadStatus, RequestToken, Session};
pub use visibility::{CheckState, VisibilityStore};
