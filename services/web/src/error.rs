//! services/web/src/error.rs
//!
//! Defines the primary error type for the entire web service.

use crate::config::ConfigError;
use wishlist_core::ports::ApiError;

/// The primary error type for the `web` service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from the remote game API.
    /// Outside startup these are handled at the call site; only the
    /// startup key check lets one reach `main`.
    #[error("Game API error: {0}")]
    Api(#[from] ApiError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
