//! Core data types of the transition engine.
//!
//! This module contains the pure data the handler threads through a
//! transition:
//! - The open key/value `Payload` and its shallow merge
//! - Lifecycle hooks and the normalized per-state hook table
//! - State descriptors and the records derived from them
//! - The bounded transition journal
//!
//! Nothing in this module performs I/O or holds the cursor.

mod hooks;
mod journal;
mod payload;
mod state;

pub use hooks::{identity, Hook, HookError, HookKind, HookResult, HookSet};
pub use journal::{TransitionJournal, TransitionKind, TransitionRecord};
pub use payload::Payload;
pub use state::{StateDescriptor, StateRecord};
