//! Builder API for handler construction.
//!
//! This module provides the serializable [`HandlerConfig`] and a fluent
//! [`HandlerBuilder`] that also carries the closure-valued options (`init`,
//! `load`) and the navigator.

pub mod config;
pub mod error;
pub mod handler;

pub use config::{HandlerConfig, DEFAULT_JOURNAL_LIMIT};
pub use error::BuildError;
pub use handler::HandlerBuilder;
