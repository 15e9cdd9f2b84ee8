//! Error handling for appfetch.
//!
//! Crate-level errors cover the front ends (terminal setup, catalog
//! construction, report output). Per-application install failures never
//! surface here; the engine converts those into run outcomes (see
//! `engine::InstallError`).

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::engine::EngineError;

/// Top-level error type for appfetch front ends.
#[derive(Debug, Error)]
pub enum AppError {
    /// IO errors (file operations, terminal).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog construction errors.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Engine precondition errors.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Terminal/UI errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// JSON report serialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General errors (catch-all for edge cases).
    #[error("{0}")]
    General(String),
}

/// Result type alias for appfetch operations.
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a general error.
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }
}
