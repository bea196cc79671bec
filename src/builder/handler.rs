//! Builder for constructing state handlers.

use crate::builder::config::HandlerConfig;
use crate::builder::error::BuildError;
use crate::contract::ContractPolicy;
use crate::core::{Hook, HookResult, Payload, StateDescriptor};
use crate::handler::{HandlerOptions, StateHandler};
use crate::navigation::{Detached, Navigator};
use std::sync::Arc;

/// Builder for constructing handlers with a fluent API.
///
/// # Example
///
/// ```rust
/// use stepwise::builder::HandlerBuilder;
/// use stepwise::core::{Payload, StateDescriptor};
/// use stepwise::navigation::{MemoryNavigator, Navigator};
///
/// let mut handler = HandlerBuilder::new()
///     .looping(true)
///     .data(Payload::new().with("visits", 0))
///     .navigator(MemoryNavigator::new())
///     .state(StateDescriptor::named("home"))
///     .state(StateDescriptor::named("about"))
///     .build()
///     .unwrap();
///
/// handler.start().unwrap();
/// handler.next().unwrap().next().unwrap();
///
/// assert_eq!(handler.current_state().unwrap().name, "home");
/// assert_eq!(handler.navigator().current_fragment().as_deref(), Some("#home"));
/// ```
pub struct HandlerBuilder<N: Navigator = Detached> {
    config: HandlerConfig,
    init: Option<Hook>,
    load: Option<Hook>,
    states: Vec<StateDescriptor>,
    navigator: N,
}

impl HandlerBuilder<Detached> {
    /// Create a new builder without history integration.
    pub fn new() -> Self {
        Self {
            config: HandlerConfig::default(),
            init: None,
            load: None,
            states: Vec::new(),
            navigator: Detached,
        }
    }
}

impl Default for HandlerBuilder<Detached> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Navigator> HandlerBuilder<N> {
    /// Replace the whole configuration.
    pub fn config(mut self, config: HandlerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.config.looping = looping;
        self
    }

    /// Set the initial shared payload.
    pub fn data(mut self, data: Payload) -> Self {
        self.config.data = data;
        self
    }

    /// Set the jump contract payload.
    pub fn jump_state(mut self, jump_state: Payload) -> Self {
        self.config.jump_state = jump_state;
        self
    }

    /// Reject states that do not supply `render`.
    pub fn require_render(mut self, require_render: bool) -> Self {
        self.config.require_render = require_render;
        self
    }

    pub fn contract_policy(mut self, policy: ContractPolicy) -> Self {
        self.config.contract_policy = policy;
        self
    }

    /// Keep at most `limit` transitions in the journal, `None` for all.
    pub fn journal_limit(mut self, limit: Option<usize>) -> Self {
        self.config.journal_limit = limit;
        self
    }

    /// Hook run before the first state renders on bootstrap.
    pub fn init<F>(mut self, hook: F) -> Self
    where
        F: Fn(Payload) -> HookResult + Send + Sync + 'static,
    {
        self.init = Some(Arc::new(hook));
        self
    }

    /// Hook run by `load` to turn the ambient payload into a contract candidate.
    pub fn on_load<F>(mut self, hook: F) -> Self
    where
        F: Fn(Payload) -> HookResult + Send + Sync + 'static,
    {
        self.load = Some(Arc::new(hook));
        self
    }

    /// Queue a state for registration, in order.
    pub fn state(mut self, descriptor: StateDescriptor) -> Self {
        self.states.push(descriptor);
        self
    }

    /// Queue several states at once.
    pub fn states(mut self, descriptors: impl IntoIterator<Item = StateDescriptor>) -> Self {
        self.states.extend(descriptors);
        self
    }

    /// Attach the handler to a navigation history.
    pub fn navigator<M: Navigator>(self, navigator: M) -> HandlerBuilder<M> {
        HandlerBuilder {
            config: self.config,
            init: self.init,
            load: self.load,
            states: self.states,
            navigator,
        }
    }

    /// Build the handler, registering queued states in order.
    pub fn build(self) -> Result<StateHandler<N>, BuildError> {
        let options = HandlerOptions::new(self.config, self.init, self.load);
        let mut handler = StateHandler::from_options(options, self.navigator);
        for descriptor in self.states {
            handler.add(descriptor)?;
        }
        Ok(handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::HandlerError;
    use crate::navigation::MemoryNavigator;

    #[test]
    fn builder_registers_states_in_order() {
        let handler = HandlerBuilder::new()
            .states(["a", "b", "c"].map(StateDescriptor::named))
            .build()
            .unwrap();

        let names: Vec<_> = handler.states().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn duplicate_states_fail_the_build() {
        let result = HandlerBuilder::new()
            .state(StateDescriptor::named("dup"))
            .state(StateDescriptor::named("dup"))
            .build();

        assert!(matches!(
            result,
            Err(BuildError::Registration(HandlerError::DuplicateState { .. }))
        ));
    }

    #[test]
    fn strict_builder_rejects_states_without_render() {
        let result = HandlerBuilder::new()
            .require_render(true)
            .state(StateDescriptor::named("bare"))
            .build();

        assert!(matches!(
            result,
            Err(BuildError::Registration(HandlerError::InvalidState { .. }))
        ));
    }

    #[test]
    fn config_carries_into_handler() {
        let config = HandlerConfig::from_json(r#"{ "loop": true, "data": { "x": 1 } }"#).unwrap();
        let handler = HandlerBuilder::new().config(config).build().unwrap();

        assert!(handler.config().looping);
        assert_eq!(handler.data().get("x"), Some(&1.into()));
    }

    #[test]
    fn navigator_receives_first_state() {
        let handler = HandlerBuilder::new()
            .navigator(MemoryNavigator::new())
            .state(StateDescriptor::named("home"))
            .state(StateDescriptor::named("about"))
            .build()
            .unwrap();

        let entries = handler.navigator().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url, "#home");
        assert_eq!(entries[0].title, "home");
    }
}
