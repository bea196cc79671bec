//! Errors raised while building a handler.

use crate::handler::HandlerError;
use thiserror::Error;

/// Errors that can occur when loading configuration or building a handler.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Configuration could not be parsed: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("State registration failed: {0}")]
    Registration(#[from] HandlerError),
}
