//! State descriptors supplied by callers and the records the engine derives
//! from them.

use super::hooks::{Hook, HookKind, HookResult, HookSet};
use super::payload::Payload;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Caller-supplied description of one state.
///
/// Every hook is optional. A descriptor without a name is named after its
/// position in the registry when it is added.
///
/// # Example
///
/// ```rust
/// use stepwise::core::{Payload, StateDescriptor};
///
/// let intro = StateDescriptor::named("intro")
///     .render(|data: Payload| Ok(data.with("shown", true)))
///     .to_next(|data: Payload| Ok(data.with("seen_intro", true)));
///
/// assert_eq!(intro.name(), Some("intro"));
/// assert!(intro.has_render());
/// ```
#[derive(Clone, Default)]
pub struct StateDescriptor {
    name: Option<String>,
    hooks: BTreeMap<HookKind, Hook>,
}

impl StateDescriptor {
    /// Anonymous descriptor; it receives a positional name on registration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Descriptor registered under `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            hooks: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether a `render` hook was supplied.
    pub fn has_render(&self) -> bool {
        self.hooks.contains_key(&HookKind::Render)
    }

    /// Attach a hook at an arbitrary lifecycle point, replacing any earlier one.
    pub fn hook<F>(mut self, kind: HookKind, hook: F) -> Self
    where
        F: Fn(Payload) -> HookResult + Send + Sync + 'static,
    {
        self.hooks.insert(kind, Arc::new(hook));
        self
    }

    pub fn render<F>(self, hook: F) -> Self
    where
        F: Fn(Payload) -> HookResult + Send + Sync + 'static,
    {
        self.hook(HookKind::Render, hook)
    }

    pub fn resize<F>(self, hook: F) -> Self
    where
        F: Fn(Payload) -> HookResult + Send + Sync + 'static,
    {
        self.hook(HookKind::Resize, hook)
    }

    pub fn to_next<F>(self, hook: F) -> Self
    where
        F: Fn(Payload) -> HookResult + Send + Sync + 'static,
    {
        self.hook(HookKind::ToNext, hook)
    }

    /// Alias of [`to_next`](Self::to_next).
    pub fn next_out<F>(self, hook: F) -> Self
    where
        F: Fn(Payload) -> HookResult + Send + Sync + 'static,
    {
        self.hook(HookKind::ToNext, hook)
    }

    pub fn from_prev<F>(self, hook: F) -> Self
    where
        F: Fn(Payload) -> HookResult + Send + Sync + 'static,
    {
        self.hook(HookKind::FromPrev, hook)
    }

    /// Alias of [`from_prev`](Self::from_prev).
    pub fn next_in<F>(self, hook: F) -> Self
    where
        F: Fn(Payload) -> HookResult + Send + Sync + 'static,
    {
        self.hook(HookKind::FromPrev, hook)
    }

    pub fn to_prev<F>(self, hook: F) -> Self
    where
        F: Fn(Payload) -> HookResult + Send + Sync + 'static,
    {
        self.hook(HookKind::ToPrev, hook)
    }

    /// Alias of [`to_prev`](Self::to_prev).
    pub fn prev_out<F>(self, hook: F) -> Self
    where
        F: Fn(Payload) -> HookResult + Send + Sync + 'static,
    {
        self.hook(HookKind::ToPrev, hook)
    }

    pub fn from_next<F>(self, hook: F) -> Self
    where
        F: Fn(Payload) -> HookResult + Send + Sync + 'static,
    {
        self.hook(HookKind::FromNext, hook)
    }

    /// Alias of [`from_next`](Self::from_next).
    pub fn prev_in<F>(self, hook: F) -> Self
    where
        F: Fn(Payload) -> HookResult + Send + Sync + 'static,
    {
        self.hook(HookKind::FromNext, hook)
    }

    pub fn jump_out<F>(self, hook: F) -> Self
    where
        F: Fn(Payload) -> HookResult + Send + Sync + 'static,
    {
        self.hook(HookKind::JumpOut, hook)
    }

    pub fn jump_in<F>(self, hook: F) -> Self
    where
        F: Fn(Payload) -> HookResult + Send + Sync + 'static,
    {
        self.hook(HookKind::JumpIn, hook)
    }

    /// Split into the name and the normalized hook table.
    pub(crate) fn into_parts(self) -> (Option<String>, HookSet) {
        (self.name, HookSet::normalize(self.hooks))
    }
}

impl fmt::Debug for StateDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDescriptor")
            .field("name", &self.name)
            .field("hooks", &self.hooks.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Engine-side record of a registered state.
///
/// `prev` and `next` hold names, not references, and follow registration
/// order. This is the value published to the navigation history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    pub name: String,
    pub prev: Option<String>,
    pub next: Option<String>,
    /// Fragment URL, `"#" + name`.
    pub url: String,
}

impl StateRecord {
    pub(crate) fn new(name: String, prev: Option<String>) -> Self {
        let url = fragment_url(&name);
        Self {
            name,
            prev,
            next: None,
            url,
        }
    }

    pub fn is_first(&self) -> bool {
        self.prev.is_none()
    }

    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}

/// Fragment URL a state is addressed by.
pub(crate) fn fragment_url(name: &str) -> String {
    format!("#{name}")
}
