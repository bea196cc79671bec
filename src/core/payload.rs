//! The shared data record threaded through every hook.
//!
//! A payload is an open key/value record. The only way two payloads are
//! combined is a shallow merge: keys of the overlay replace keys of the base,
//! every other key of the base survives untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open key/value record passed by value into each hook.
///
/// # Example
///
/// ```rust
/// use stepwise::core::Payload;
///
/// let base = Payload::new().with("x", 1).with("y", 2);
/// let overlay = Payload::new().with("y", 20).with("z", 30);
///
/// let merged = base.merge(&overlay);
/// assert_eq!(merged.get("x"), Some(&1.into()));
/// assert_eq!(merged.get("y"), Some(&20.into()));
/// assert_eq!(merged.get("z"), Some(&30.into()));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert a value, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Read a boolean field, `None` when absent or not a boolean.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Shallow merge, returning a new payload.
    ///
    /// Nested objects are replaced, not merged.
    pub fn merge(&self, overlay: &Payload) -> Payload {
        let mut merged = self.clone();
        merged.merge_in(overlay.clone());
        merged
    }

    /// Shallow merge in place, consuming the overlay.
    pub fn merge_in(&mut self, overlay: Payload) {
        for (key, value) in overlay.0 {
            self.0.insert(key, value);
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Payload> for Value {
    fn from(payload: Payload) -> Self {
        Value::Object(payload.0)
    }
}

/// Only JSON objects convert; any other value is handed back as the error.
impl TryFrom<Value> for Payload {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Payload {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
