//! Serializable handler configuration.

use super::error::BuildError;
use crate::contract::ContractPolicy;
use crate::core::Payload;
use serde::{Deserialize, Serialize};

/// Transitions a handler journals unless configured otherwise.
pub const DEFAULT_JOURNAL_LIMIT: usize = 1024;

/// Options recognized by a handler.
///
/// Every field has a default, so a partial document is a valid config.
///
/// # Example
///
/// ```rust
/// use stepwise::builder::HandlerConfig;
/// use stepwise::contract::ContractPolicy;
///
/// let config = HandlerConfig::from_json(
///     r#"{ "loop": true, "data": { "lang": "en" }, "contract_policy": "warn" }"#,
/// )
/// .unwrap();
///
/// assert!(config.looping);
/// assert_eq!(config.data.get("lang"), Some(&"en".into()));
/// assert_eq!(config.contract_policy, ContractPolicy::Warn);
/// assert!(config.jump_state.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// Wrap from the last state to the first and back
    #[serde(rename = "loop")]
    pub looping: bool,

    /// Initial shared payload
    pub data: Payload,

    /// Contract payload `jumpIn` hooks are seeded from
    #[serde(alias = "jumpState")]
    pub jump_state: Payload,

    /// Reject descriptors that do not supply `render`
    #[serde(alias = "requireRender")]
    pub require_render: bool,

    /// What to do with payloads that break the jump contract
    #[serde(alias = "contractPolicy")]
    pub contract_policy: ContractPolicy,

    /// Most transitions kept in the journal; `null` keeps all of them and
    /// `0` turns journaling off
    #[serde(alias = "journalLimit")]
    pub journal_limit: Option<usize>,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            looping: false,
            data: Payload::default(),
            jump_state: Payload::default(),
            require_render: false,
            contract_policy: ContractPolicy::default(),
            journal_limit: Some(DEFAULT_JOURNAL_LIMIT),
        }
    }
}

impl HandlerConfig {
    /// Parse a JSON config document.
    pub fn from_json(source: &str) -> Result<Self, BuildError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_data(mut self, data: Payload) -> Self {
        self.data = data;
        self
    }

    pub fn with_jump_state(mut self, jump_state: Payload) -> Self {
        self.jump_state = jump_state;
        self
    }

    pub fn with_require_render(mut self, require_render: bool) -> Self {
        self.require_render = require_render;
        self
    }

    pub fn with_contract_policy(mut self, policy: ContractPolicy) -> Self {
        self.contract_policy = policy;
        self
    }

    /// Cap the journal at `limit` transitions, `None` for no cap.
    pub fn with_journal_limit(mut self, limit: Option<usize>) -> Self {
        self.journal_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = HandlerConfig::from_json("{}").unwrap();
        assert_eq!(config, HandlerConfig::default());
        assert!(!config.looping);
        assert_eq!(config.contract_policy, ContractPolicy::Lenient);
        assert_eq!(config.journal_limit, Some(DEFAULT_JOURNAL_LIMIT));
    }

    #[test]
    fn journal_limit_can_be_lifted_or_set() {
        let unbounded = HandlerConfig::from_json(r#"{ "journal_limit": null }"#).unwrap();
        assert_eq!(unbounded.journal_limit, None);

        let capped = HandlerConfig::from_json(r#"{ "journalLimit": 16 }"#).unwrap();
        assert_eq!(capped.journal_limit, Some(16));
    }

    #[test]
    fn camel_case_keys_are_accepted() {
        let config =
            HandlerConfig::from_json(r#"{ "jumpState": { "user": "" }, "requireRender": true }"#)
                .unwrap();

        assert!(config.jump_state.contains_key("user"));
        assert!(config.require_render);
    }

    #[test]
    fn malformed_document_is_rejected() {
        let result = HandlerConfig::from_json(r#"{ "loop": "sometimes" }"#);
        assert!(matches!(result, Err(BuildError::InvalidConfig(_))));
    }

    #[test]
    fn config_serializes_loop_key() {
        let json = serde_json::to_value(HandlerConfig::default().with_looping(true)).unwrap();
        assert_eq!(json["loop"], serde_json::Value::Bool(true));
        assert_eq!(json["contract_policy"], "lenient");
    }
}
