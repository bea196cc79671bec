//! Errors raised by handler operations.

use crate::contract::ContractViolation;
use crate::core::{HookError, HookKind};
use thiserror::Error;

/// Errors that can occur while registering states or transitioning.
///
/// Every failure is local to the call that raised it: the cursor, the shared
/// payload and the navigation history are left as they were before the call.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("No state after current state '{current}'")]
    NoNextState { current: String },

    #[error("No state before current state '{current}'")]
    NoPrevState { current: String },

    #[error("State '{name}' does not exist")]
    StateNotFound { name: String },

    #[error("State '{name}' already exists")]
    DuplicateState { name: String },

    #[error("State '{name}' is invalid: {reason}")]
    InvalidState { name: String, reason: String },

    #[error("No states have been registered")]
    EmptyRegistry,

    #[error("Hook '{hook}' of state '{state}' failed: {source}")]
    Hook {
        state: String,
        hook: HookKind,
        #[source]
        source: HookError,
    },

    #[error("Handler '{hook}' hook failed: {source}")]
    Lifecycle {
        hook: &'static str,
        #[source]
        source: HookError,
    },

    #[error("Payload for '{state}' breaks the jump contract ({} violation(s))", .violations.len())]
    ContractViolated {
        state: String,
        violations: Vec<ContractViolation>,
    },
}

impl HandlerError {
    /// Boundary errors are recoverable by switching direction or looping.
    pub fn is_boundary(&self) -> bool {
        matches!(self, Self::NoNextState { .. } | Self::NoPrevState { .. })
    }
}
