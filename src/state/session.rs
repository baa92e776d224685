//! Load Session
//!
//! Tracks the conversion of one uploaded archive at a time. Every load is
//! keyed by a [`RequestToken`]; only the most recently issued token may
//! install its result, so a slow conversion that finishes after a newer one
//! has started is dropped instead of overwriting fresher state.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ViewerConfig;
use crate::error::Result;
use crate::layers::RenderResult;
use crate::render::BoardCompositor;

/// Identifies one load request. Tokens increase monotonically per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Presentation status of the current load
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Nothing uploaded yet
    #[default]
    Idle,
    /// A conversion is in flight
    Loading,
    /// The latest conversion succeeded
    Ready,
    /// The latest conversion failed with a user-facing message
    Failed(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// What happened to a finished conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The result replaced the current view
    Applied,
    /// The failure was recorded; the previous view is untouched
    Failed,
    /// A newer request exists; the result was discarded
    Stale,
}

/// One viewer session: load status plus the board view of the latest result
#[derive(Debug, Default)]
pub struct Session {
    config: ViewerConfig,
    status: LoadStatus,
    latest: Option<RequestToken>,
    issued: u64,
    board: Option<BoardCompositor>,
    loaded_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Start a new conversion, superseding any that is still in flight.
    pub fn begin_load(&mut self) -> RequestToken {
        self.issued += 1;
        let token = RequestToken(self.issued);
        if let Some(previous) = self.latest.filter(|_| self.status.is_loading()) {
            tracing::debug!(%previous, superseded_by = %token, "superseding in-flight load");
        }
        self.latest = Some(token);
        self.status = LoadStatus::Loading;
        token
    }

    /// Deliver the outcome of the conversion started with `token`.
    ///
    /// A successful result builds a fresh board (classification and
    /// visibility are derived again, nothing carries over). A failure keeps
    /// the previous board. Results for superseded tokens are dropped.
    pub fn finish_load(&mut self, token: RequestToken, result: Result<RenderResult>) -> LoadOutcome {
        if self.latest != Some(token) {
            tracing::warn!(%token, latest = ?self.latest.map(|t| t.value()), "dropping stale load result");
            return LoadOutcome::Stale;
        }

        match result.and_then(|r| r.validate().map(|_| r)) {
            Ok(result) => {
                tracing::info!(%token, layers = result.len(), "board loaded");
                self.board = Some(BoardCompositor::new(result, &self.config));
                self.status = LoadStatus::Ready;
                self.loaded_at = Some(Utc::now());
                LoadOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(%token, code = err.error_code(), "board load failed: {}", err);
                self.status = LoadStatus::Failed(err.friendly_message());
                LoadOutcome::Failed
            }
        }
    }

    /// Run a synchronous conversion end to end.
    pub fn load_with<F>(&mut self, convert: F) -> LoadOutcome
    where
        F: FnOnce() -> Result<RenderResult>,
    {
        let token = self.begin_load();
        self.finish_load(token, convert())
    }

    /// Return to the initial empty state. Outstanding tokens become stale.
    pub fn reset(&mut self) {
        self.status = LoadStatus::Idle;
        self.latest = None;
        self.board = None;
        self.loaded_at = None;
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn board(&self) -> Option<&BoardCompositor> {
        self.board.as_ref()
    }

    pub fn board_mut(&mut self) -> Option<&mut BoardCompositor> {
        self.board.as_mut()
    }

    /// When the current board was installed
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }
}
