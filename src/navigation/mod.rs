//! Host navigation capability.
//!
//! The handler never talks to a concrete browser. It publishes states through
//! a [`Navigator`], reads the addressable fragment from it, and receives the
//! host's back/forward and resize notifications as [`HostEvent`]s passed to
//! `StateHandler::dispatch`.

mod memory;

pub use memory::{HistoryEntry, MemoryNavigator};

use crate::core::StateRecord;

/// Notifications the host delivers to a started handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostEvent {
    /// The user moved through the host's history (`popstate`).
    Navigate,
    /// The viewport changed size.
    Resize,
}

/// Navigation history the handler publishes into.
pub trait Navigator {
    /// Record `record` as the current navigable entry at `url`.
    fn publish(&mut self, record: &StateRecord, title: &str, url: &str);

    /// The current location fragment, with or without its leading `#`.
    fn current_fragment(&self) -> Option<String>;

    /// Whether the host already holds navigable history for this handler.
    fn has_history(&self) -> bool;

    /// `false` when history integration is disabled; nothing is published then.
    fn is_attached(&self) -> bool {
        true
    }
}

impl<N: Navigator + ?Sized> Navigator for Box<N> {
    fn publish(&mut self, record: &StateRecord, title: &str, url: &str) {
        (**self).publish(record, title, url)
    }

    fn current_fragment(&self) -> Option<String> {
        (**self).current_fragment()
    }

    fn has_history(&self) -> bool {
        (**self).has_history()
    }

    fn is_attached(&self) -> bool {
        (**self).is_attached()
    }
}

/// Navigator for handlers without history integration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Detached;

impl Navigator for Detached {
    fn publish(&mut self, _record: &StateRecord, _title: &str, _url: &str) {}

    fn current_fragment(&self) -> Option<String> {
        None
    }

    fn has_history(&self) -> bool {
        false
    }

    fn is_attached(&self) -> bool {
        false
    }
}

/// Strip the leading `#`, treating an empty fragment as absent.
pub(crate) fn fragment_name(raw: Option<String>) -> Option<String> {
    let raw = raw?;
    let name = raw.strip_prefix('#').unwrap_or(&raw);
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_name_strips_hash() {
        assert_eq!(fragment_name(Some("#intro".into())), Some("intro".into()));
        assert_eq!(fragment_name(Some("intro".into())), Some("intro".into()));
    }

    #[test]
    fn empty_fragments_are_absent() {
        assert_eq!(fragment_name(Some("#".into())), None);
        assert_eq!(fragment_name(Some(String::new())), None);
        assert_eq!(fragment_name(None), None);
    }

    #[test]
    fn detached_navigator_is_inert() {
        let mut nav = Detached;
        nav.publish(&StateRecord::new("a".into(), None), "a", "#a");

        assert!(!nav.is_attached());
        assert!(!nav.has_history());
        assert_eq!(nav.current_fragment(), None);
    }

    #[test]
    fn boxed_navigator_forwards() {
        let mut nav: Box<dyn Navigator> = Box::new(MemoryNavigator::new());
        nav.publish(&StateRecord::new("a".into(), None), "a", "#a");

        assert!(nav.has_history());
        assert_eq!(nav.current_fragment().as_deref(), Some("#a"));
    }
}
