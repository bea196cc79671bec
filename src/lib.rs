//! Stepwise: an ordered state transition engine
//!
//! A handler holds a sequence of named states, tracks which one is current,
//! and moves between them forward, backward or by direct jump. Every move
//! threads a copy of a shared payload through a fixed set of lifecycle hooks
//! and merges the result back. Optionally the current state is mirrored into
//! a host navigation history so moves are addressable and resumable.
//!
//! # Core Concepts
//!
//! - **State**: a named descriptor with optional lifecycle hooks
//! - **Payload**: the open key/value record hooks receive and return
//! - **Hooks**: `payload -> payload` functions; missing ones are identity
//! - **Navigator**: the host history capability the handler publishes into
//!
//! # Example
//!
//! ```rust
//! use stepwise::builder::HandlerBuilder;
//! use stepwise::core::{Payload, StateDescriptor};
//!
//! let mut handler = HandlerBuilder::new()
//!     .state(StateDescriptor::named("first").next_out(|data: Payload| Ok(data.with("x", true))))
//!     .state(StateDescriptor::named("second").next_in(|data: Payload| {
//!         assert_eq!(data.get_bool("x"), Some(true));
//!         Ok(data.with("x2", true))
//!     }))
//!     .build()
//!     .unwrap();
//!
//! handler.next().unwrap();
//!
//! assert_eq!(handler.current_state().unwrap().name, "second");
//! assert_eq!(handler.data().get_bool("x2"), Some(true));
//! ```

pub mod builder;
pub mod contract;
pub mod core;
pub mod handler;
pub mod navigation;

// Re-export commonly used types
pub use builder::{HandlerBuilder, HandlerConfig};
pub use self::core::{HookError, Payload, StateDescriptor, StateRecord};
pub use handler::{HandlerError, SharedHandler, StateHandler};
pub use navigation::{HostEvent, MemoryNavigator, Navigator};
