//! Registration-ordered arena of state records and their hook tables.

use super::error::HandlerError;
use crate::core::{HookKind, HookSet, Payload, StateDescriptor, StateRecord};
use std::collections::HashMap;

/// Ordered set of registered states.
///
/// Records are stored in registration order. Each record links to its
/// neighbors by name; links are rewritten on `register` and stitched back
/// together on `remove`.
#[derive(Debug, Default)]
pub struct StateRegistry {
    states: Vec<StateRecord>,
    methods: HashMap<String, HookSet>,
}

impl StateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Records in registration order.
    pub fn records(&self) -> &[StateRecord] {
        &self.states
    }

    /// Record at `index` in registration order.
    pub fn get(&self, index: usize) -> Option<&StateRecord> {
        self.states.get(index)
    }

    /// Registration index of the state called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.states.iter().position(|state| state.name == name)
    }

    /// Whether a state called `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Normalized hook table of the state called `name`.
    pub fn hooks(&self, name: &str) -> Option<&HookSet> {
        self.methods.get(name)
    }

    /// Append a state after the current tail.
    ///
    /// A missing name defaults to the state's position. With `require_render`
    /// set, descriptors without a `render` hook are rejected.
    pub fn register(
        &mut self,
        descriptor: StateDescriptor,
        require_render: bool,
    ) -> Result<&StateRecord, HandlerError> {
        let (name, hooks) = descriptor.into_parts();
        let name = name.unwrap_or_else(|| self.states.len().to_string());

        if self.contains(&name) {
            return Err(HandlerError::DuplicateState { name });
        }
        if require_render && !hooks.has_render() {
            return Err(HandlerError::InvalidState {
                name,
                reason: "missing required render hook".to_string(),
            });
        }

        let prev = self.states.last_mut().map(|tail| {
            tail.next = Some(name.clone());
            tail.name.clone()
        });

        self.methods.insert(name.clone(), hooks);
        self.states.push(StateRecord::new(name, prev));

        let index = self.states.len() - 1;
        Ok(&self.states[index])
    }

    /// Excise a state, linking its neighbors to each other.
    ///
    /// Returns the removed record and the index it occupied.
    pub fn remove(&mut self, name: &str) -> Result<(usize, StateRecord), HandlerError> {
        let index = self
            .position(name)
            .ok_or_else(|| HandlerError::StateNotFound {
                name: name.to_string(),
            })?;

        let removed = self.states.remove(index);
        self.methods.remove(name);

        if let Some(prev) = removed.prev.as_deref() {
            if let Some(record) = self.states.iter_mut().find(|s| s.name == prev) {
                record.next = removed.next.clone();
            }
        }
        if let Some(next) = removed.next.as_deref() {
            if let Some(record) = self.states.iter_mut().find(|s| s.name == next) {
                record.prev = removed.prev.clone();
            }
        }

        Ok((index, removed))
    }

    /// Index reached by stepping forward from `index`.
    ///
    /// Follows the `next` link, wrapping to the first state when `looping`.
    pub fn successor(&self, index: usize, looping: bool) -> Option<usize> {
        let current = self.get(index)?;
        match current.next.as_deref() {
            Some(next) => self.position(next),
            None if looping => Some(0),
            None => None,
        }
    }

    /// Index reached by stepping backward from `index`.
    ///
    /// Follows the `prev` link, wrapping to the last state when `looping`.
    pub fn predecessor(&self, index: usize, looping: bool) -> Option<usize> {
        let current = self.get(index)?;
        match current.prev.as_deref() {
            Some(prev) => self.position(prev),
            None if looping => Some(self.states.len() - 1),
            None => None,
        }
    }

    /// Run one hook of a registered state.
    pub fn invoke(
        &self,
        name: &str,
        kind: HookKind,
        payload: Payload,
    ) -> Result<Payload, HandlerError> {
        let hooks = self
            .hooks(name)
            .ok_or_else(|| HandlerError::StateNotFound {
                name: name.to_string(),
            })?;

        tracing::trace!(state = name, hook = %kind, "invoking hook");
        hooks
            .call(kind, payload)
            .map_err(|source| HandlerError::Hook {
                state: name.to_string(),
                hook: kind,
                source,
            })
    }
}
