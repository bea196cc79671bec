//! Journal of committed transitions.
//!
//! Tracks the states a handler moved through, oldest first. A journal may be
//! capped; once full, recording a transition drops the oldest one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// Which operation committed a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    /// Bootstrap of the first state by `start` or a history reset.
    Init,
    Next,
    Prev,
    Jump,
    Load,
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::Next => "next",
            Self::Prev => "prev",
            Self::Jump => "jump",
            Self::Load => "load",
        };
        f.write_str(name)
    }
}

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use stepwise::core::{TransitionKind, TransitionRecord};
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: Some("cart".to_string()),
///     to: "checkout".to_string(),
///     kind: TransitionKind::Next,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.kind.to_string(), "next");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state left behind, `None` for the bootstrap transition
    pub from: Option<String>,
    /// The state arrived at
    pub to: String,
    pub kind: TransitionKind,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

/// Ordered journal of transitions, optionally capped.
///
/// # Example
///
/// ```rust
/// use stepwise::core::{TransitionJournal, TransitionKind, TransitionRecord};
/// use chrono::Utc;
///
/// let journal = TransitionJournal::new()
///     .record(TransitionRecord {
///         from: Some("a".to_string()),
///         to: "b".to_string(),
///         kind: TransitionKind::Next,
///         timestamp: Utc::now(),
///     })
///     .record(TransitionRecord {
///         from: Some("b".to_string()),
///         to: "d".to_string(),
///         kind: TransitionKind::Jump,
///         timestamp: Utc::now(),
///     });
///
/// assert_eq!(journal.get_path(), vec!["a", "b", "d"]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransitionJournal {
    transitions: VecDeque<TransitionRecord>,
    #[serde(default)]
    limit: Option<usize>,
}

impl TransitionJournal {
    /// Unbounded journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Journal keeping at most `limit` transitions. A limit of zero records
    /// nothing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stepwise::core::{TransitionJournal, TransitionKind, TransitionRecord};
    /// use chrono::Utc;
    ///
    /// let mut journal = TransitionJournal::with_limit(Some(2));
    /// for to in ["a", "b", "c"] {
    ///     journal.push(TransitionRecord {
    ///         from: None,
    ///         to: to.to_string(),
    ///         kind: TransitionKind::Jump,
    ///         timestamp: Utc::now(),
    ///     });
    /// }
    ///
    /// assert_eq!(journal.get_path(), vec!["b", "c"]);
    /// ```
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            transitions: VecDeque::new(),
            limit,
        }
    }

    /// Maximum number of retained transitions, `None` when unbounded.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Append a transition in place, dropping the oldest ones past the limit.
    pub fn push(&mut self, transition: TransitionRecord) {
        if self.limit == Some(0) {
            return;
        }
        self.transitions.push_back(transition);
        if let Some(limit) = self.limit {
            while self.transitions.len() > limit {
                self.transitions.pop_front();
            }
        }
    }

    /// Record a transition, returning the journal for chaining.
    pub fn record(mut self, transition: TransitionRecord) -> Self {
        self.push(transition);
        self
    }

    /// Names of the states visited, in order.
    ///
    /// Starts with the `from` of the oldest retained transition when it has
    /// one, then the `to` of every transition.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(from) = self.transitions.front().and_then(|t| t.from.as_deref()) {
            path.push(from);
        }
        for transition in &self.transitions {
            path.push(transition.to.as_str());
        }
        path
    }

    /// Time between the oldest and newest transition, `None` when empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            last.timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok()
        } else {
            None
        }
    }

    /// Retained transitions, oldest first.
    pub fn transitions(&self) -> &VecDeque<TransitionRecord> {
        &self.transitions
    }

    /// The most recent transition.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(from: Option<&str>, to: &str, kind: TransitionKind) -> TransitionRecord {
        TransitionRecord {
            from: from.map(str::to_string),
            to: to.to_string(),
            kind,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_journal_is_empty() {
        let journal = TransitionJournal::new();
        assert!(journal.is_empty());
        assert!(journal.limit().is_none());
        assert!(journal.get_path().is_empty());
        assert!(journal.duration().is_none());
    }

    #[test]
    fn push_appends_in_place() {
        let mut journal = TransitionJournal::new();
        journal.push(step(Some("a"), "b", TransitionKind::Next));
        journal.push(step(Some("b"), "c", TransitionKind::Next));

        assert_eq!(journal.len(), 2);
        assert_eq!(journal.last().map(|t| t.to.as_str()), Some("c"));
    }

    #[test]
    fn limit_drops_oldest_transitions() {
        let mut journal = TransitionJournal::with_limit(Some(3));
        for i in 0..10 {
            journal.push(step(None, &i.to_string(), TransitionKind::Jump));
        }

        assert_eq!(journal.len(), 3);
        assert_eq!(journal.get_path(), vec!["7", "8", "9"]);
    }

    #[test]
    fn zero_limit_records_nothing() {
        let journal = TransitionJournal::with_limit(Some(0))
            .record(step(None, "a", TransitionKind::Init));
        assert!(journal.is_empty());
    }

    #[test]
    fn path_starts_at_bootstrap_target() {
        let journal = TransitionJournal::new()
            .record(step(None, "a", TransitionKind::Init))
            .record(step(Some("a"), "b", TransitionKind::Next))
            .record(step(Some("b"), "a", TransitionKind::Prev));

        assert_eq!(journal.get_path(), vec!["a", "b", "a"]);
    }

    #[test]
    fn duration_spans_first_to_last() {
        let journal = TransitionJournal::new().record(step(None, "a", TransitionKind::Init));
        std::thread::sleep(Duration::from_millis(10));
        let journal = journal.record(step(Some("a"), "b", TransitionKind::Next));

        assert!(journal.duration().unwrap() >= Duration::from_millis(10));
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&TransitionKind::Jump).unwrap();
        assert_eq!(json, r#""jump""#);
    }

    #[test]
    fn journal_serializes_correctly() {
        let journal = TransitionJournal::with_limit(Some(8))
            .record(step(Some("a"), "b", TransitionKind::Load));
        let json = serde_json::to_string(&journal).unwrap();
        let back: TransitionJournal = serde_json::from_str(&json).unwrap();

        assert_eq!(back.transitions(), journal.transitions());
        assert_eq!(back.limit(), Some(8));
    }
}
