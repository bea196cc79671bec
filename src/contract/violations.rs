//! Contract violations and the policy for handling them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ways a candidate payload can break the jump contract
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ContractViolation {
    #[error("Field '{field}' required by the jump contract is missing")]
    MissingField { field: String },

    #[error("Field '{field}' should be {expected} but is {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Strategy for handling contract violations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractPolicy {
    /// Skip validation entirely
    #[default]
    Lenient,

    /// Validate and log each violation, but let the transition proceed
    Warn,

    /// Fail the transition before anything is committed
    Enforce,
}
