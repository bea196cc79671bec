//! Jump contract validation.
//!
//! A jump may originate from any state, so the arriving state cannot rely on
//! the shape of whatever the leaving state produced. The configured
//! `jump_state` payload is the contract both sides are expected to honor:
//! `jumpOut` (or the `load` hook) produces a candidate, and `jumpIn` is seeded
//! from the contract itself.
//!
//! Checking is off by default. Under [`ContractPolicy::Warn`] or
//! [`ContractPolicy::Enforce`] candidates are validated with Stillwater's
//! `Validation`, which accumulates every violation instead of stopping at
//! the first.
//!
//! # Example
//!
//! ```rust
//! use stepwise::contract::{ContractViolation, JumpContract};
//! use stepwise::core::Payload;
//!
//! let contract = JumpContract::new(Payload::new().with("user", "").with("step", 0));
//! let candidate = Payload::new().with("step", "late");
//!
//! let violations = contract.violations(&candidate);
//! assert_eq!(violations.len(), 2);
//! assert!(violations.contains(&ContractViolation::MissingField { field: "user".into() }));
//! ```

pub mod rules;
pub mod violations;

pub use rules::JumpContract;
pub use violations::{ContractPolicy, ContractViolation};
