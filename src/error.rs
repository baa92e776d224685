//! Error handling for Layerstack
//!
//! Ingestion failures are the only errors surfaced to the user. Classification,
//! visibility changes, styling and compositing are total over well-formed
//! layer lists and never return an error.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for Layerstack operations
pub type Result<T> = std::result::Result<T, LayerstackError>;

/// Main error type for Layerstack operations
#[derive(Error, Debug)]
pub enum LayerstackError {
    // Ingestion Errors
    #[error("Failed to load board: {reason}")]
    Ingestion { reason: String },

    #[error("Duplicate layer id in result set: {id}")]
    DuplicateLayerId { id: String },

    // Configuration Errors
    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LayerstackError {
    /// Build an ingestion error from anything displayable
    pub fn ingestion(reason: impl Into<String>) -> Self {
        LayerstackError::Ingestion {
            reason: reason.into(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            LayerstackError::Ingestion { .. } => "INGESTION_ERROR",
            LayerstackError::DuplicateLayerId { .. } => "DUPLICATE_LAYER_ID",
            LayerstackError::Config { .. } => "CONFIG_ERROR",
            LayerstackError::FileNotFound { .. } => "FILE_NOT_FOUND",
            LayerstackError::Io(_) => "IO_ERROR",
            LayerstackError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if the user can fix this by supplying different input
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LayerstackError::FileNotFound { .. }
                | LayerstackError::Config { .. }
        )
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            LayerstackError::Ingestion { .. } | LayerstackError::Serialization(_) => vec![
                "Check that the archive was exported by your CAD tool's fabrication output",
                "Re-export the Gerber files and try again",
            ],
            LayerstackError::FileNotFound { .. } => vec!["Check the file path is correct"],
            LayerstackError::Config { .. } => vec![
                "Delete the configuration file to fall back to defaults",
                "Valid color schemes: original, bw, bw-invert",
            ],
            _ => vec![],
        }
    }

    /// The single message shown in place of the board when loading fails
    pub fn friendly_message(&self) -> String {
        match self {
            LayerstackError::Ingestion { reason } => reason.clone(),
            LayerstackError::DuplicateLayerId { id } => {
                format!("The board contains two layers named '{}'.", id)
            }
            _ => self.to_string(),
        }
    }
}
