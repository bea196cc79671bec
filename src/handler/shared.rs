//! Handler handle that can be shared across threads and tasks.

use super::{HandlerError, StateHandler};
use crate::core::{Payload, StateDescriptor, StateRecord};
use crate::navigation::{Detached, HostEvent, Navigator};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Clonable handle serializing every operation behind one mutex.
///
/// A transition reads and writes the cursor, the registry and the payload as
/// one unit, so they are guarded together.
pub struct SharedHandler<N: Navigator = Detached> {
    inner: Arc<Mutex<StateHandler<N>>>,
}

impl<N: Navigator> Clone for SharedHandler<N> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<N: Navigator> SharedHandler<N> {
    pub fn new(handler: StateHandler<N>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(handler)),
        }
    }

    // Hooks run before anything is committed, and a commit updates the
    // handler fully before publishing. A panic in either leaves the guarded
    // handler consistent, though the host may miss the last entry.
    fn lock(&self) -> MutexGuard<'_, StateHandler<N>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the handler.
    pub fn with<R>(&self, f: impl FnOnce(&mut StateHandler<N>) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn add(&self, descriptor: StateDescriptor) -> Result<(), HandlerError> {
        self.lock().add(descriptor).map(|_| ())
    }

    pub fn remove(&self, name: &str) -> Result<StateRecord, HandlerError> {
        self.lock().remove(name)
    }

    pub fn next(&self) -> Result<(), HandlerError> {
        self.lock().next().map(|_| ())
    }

    pub fn prev(&self) -> Result<(), HandlerError> {
        self.lock().prev().map(|_| ())
    }

    pub fn jump_to(&self, name: &str) -> Result<(), HandlerError> {
        self.lock().jump_to(name).map(|_| ())
    }

    pub fn load(&self, name: &str) -> Result<(), HandlerError> {
        self.lock().load(name).map(|_| ())
    }

    pub fn resize(&self) -> Result<(), HandlerError> {
        self.lock().resize().map(|_| ())
    }

    pub fn start(&self) -> Result<(), HandlerError> {
        self.lock().start().map(|_| ())
    }

    pub fn dispatch(&self, event: HostEvent) -> Result<(), HandlerError> {
        self.lock().dispatch(event)
    }

    /// Snapshot of the current state.
    pub fn current_state(&self) -> Option<StateRecord> {
        self.lock().current_state().cloned()
    }

    /// Snapshot of the shared payload.
    pub fn data(&self) -> Payload {
        self.lock().data().clone()
    }
}
