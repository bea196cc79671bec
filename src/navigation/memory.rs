//! In-memory navigation history.

use super::Navigator;
use crate::core::StateRecord;
use serde::{Deserialize, Serialize};

/// One published history entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub record: StateRecord,
    pub title: String,
    pub url: String,
}

/// Navigator backed by a plain entry stack.
///
/// Behaves like a browser session history: publishing drops any forward
/// entries, and `back`/`forward` move the location without publishing.
/// After moving, deliver `HostEvent::Navigate` to the handler.
#[derive(Clone, Debug, Default)]
pub struct MemoryNavigator {
    entries: Vec<HistoryEntry>,
    position: Option<usize>,
    location: Option<String>,
}

impl MemoryNavigator {
    /// Navigator with no entries and no location.
    pub fn new() -> Self {
        Self::default()
    }

    /// A navigator whose location already carries `fragment`, as when a page
    /// is opened from an addressable URL.
    pub fn at(fragment: impl Into<String>) -> Self {
        Self {
            location: Some(fragment.into()),
            ..Self::default()
        }
    }

    /// Point the location somewhere without recording an entry.
    pub fn set_location(&mut self, fragment: impl Into<String>) {
        self.location = Some(fragment.into());
    }

    /// Step back one entry. Returns the new location, `None` at the start.
    pub fn back(&mut self) -> Option<&str> {
        let position = self.position?.checked_sub(1)?;
        self.move_to(position)
    }

    /// Step forward one entry. Returns the new location, `None` at the end.
    pub fn forward(&mut self) -> Option<&str> {
        let position = self.position? + 1;
        if position >= self.entries.len() {
            return None;
        }
        self.move_to(position)
    }

    /// Every published entry, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// The entry the location currently points at.
    pub fn current_entry(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.position?)
    }

    fn move_to(&mut self, position: usize) -> Option<&str> {
        let url = self.entries.get(position)?.url.clone();
        self.position = Some(position);
        self.location = Some(url);
        self.location.as_deref()
    }
}

impl Navigator for MemoryNavigator {
    fn publish(&mut self, record: &StateRecord, title: &str, url: &str) {
        let keep = self.position.map_or(0, |p| p + 1);
        self.entries.truncate(keep);
        self.entries.push(HistoryEntry {
            record: record.clone(),
            title: title.to_string(),
            url: url.to_string(),
        });
        self.position = Some(self.entries.len() - 1);
        self.location = Some(url.to_string());
    }

    fn current_fragment(&self) -> Option<String> {
        self.location.clone()
    }

    fn has_history(&self) -> bool {
        !self.entries.is_empty()
    }
}
