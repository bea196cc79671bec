//! The state handler: registration, traversal and host integration.
//!
//! A transition always follows the same protocol:
//! 1. copy the shared payload,
//! 2. thread the copy through the leaving and arriving hooks, then `render`,
//! 3. shallow-merge the result back, move the cursor, journal the move, then
//!    publish the arriving state to the navigator.
//!
//! Step 3 only happens once every hook in step 2 succeeded, so a failed
//! transition leaves the cursor, the shared payload and the history exactly
//! as they were. Side effects a hook performs on its own captured state are
//! not rolled back.

mod error;
mod registry;
mod shared;

pub use error::HandlerError;
pub use registry::StateRegistry;
pub use shared::SharedHandler;

use crate::builder::HandlerConfig;
use crate::contract::{ContractPolicy, JumpContract};
use crate::core::{
    identity, Hook, HookError, HookKind, HookResult, Payload, StateDescriptor, StateRecord,
    TransitionJournal, TransitionKind, TransitionRecord,
};
use crate::navigation::{fragment_name, Detached, HostEvent, Navigator};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};

/// Handler-wide options fixed at construction.
pub(crate) struct HandlerOptions {
    config: HandlerConfig,
    init: Hook,
    load: Hook,
    contract: JumpContract,
}

impl HandlerOptions {
    pub(crate) fn new(config: HandlerConfig, init: Option<Hook>, load: Option<Hook>) -> Self {
        let contract = JumpContract::new(config.jump_state.clone());
        Self {
            config,
            init: init.unwrap_or_else(identity),
            load: load.unwrap_or_else(identity),
            contract,
        }
    }
}

/// Where a jump was asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Via {
    /// The consumer called an operation; the target is published.
    Consumer,
    /// The host already moved through its history. Nothing is published and
    /// the jump contract can only warn.
    Host,
}

/// Ordered state transition engine.
///
/// # Example
///
/// ```rust
/// use stepwise::builder::HandlerConfig;
/// use stepwise::core::{Payload, StateDescriptor};
/// use stepwise::handler::{HandlerError, StateHandler};
///
/// let mut handler = StateHandler::new(HandlerConfig::default());
/// handler.add(StateDescriptor::named("first"))?;
/// handler.add(
///     StateDescriptor::named("second").from_prev(|data: Payload| Ok(data.with("arrived", true))),
/// )?;
///
/// assert_eq!(handler.current_state().map(|s| s.name.as_str()), Some("first"));
///
/// handler.next()?;
/// assert_eq!(handler.current_state().map(|s| s.name.as_str()), Some("second"));
/// assert_eq!(handler.data().get_bool("arrived"), Some(true));
///
/// assert!(matches!(handler.next(), Err(HandlerError::NoNextState { .. })));
/// # Ok::<(), HandlerError>(())
/// ```
pub struct StateHandler<N: Navigator = Detached> {
    registry: StateRegistry,
    cursor: usize,
    data: Payload,
    options: HandlerOptions,
    navigator: N,
    journal: TransitionJournal,
    arrival: Option<String>,
    listening: bool,
    init_override: Option<Hook>,
}

impl<N: Navigator> std::fmt::Debug for StateHandler<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateHandler")
            .field("registry", &self.registry)
            .field("cursor", &self.cursor)
            .field("data", &self.data)
            .field("journal", &self.journal)
            .field("arrival", &self.arrival)
            .field("listening", &self.listening)
            .finish_non_exhaustive()
    }
}

impl StateHandler<Detached> {
    /// Handler without history integration.
    pub fn new(config: HandlerConfig) -> Self {
        Self::with_navigator(config, Detached)
    }
}

impl<N: Navigator> StateHandler<N> {
    /// Handler that publishes every transition to `navigator`.
    pub fn with_navigator(config: HandlerConfig, navigator: N) -> Self {
        Self::from_options(HandlerOptions::new(config, None, None), navigator)
    }

    pub(crate) fn from_options(options: HandlerOptions, navigator: N) -> Self {
        // The fragment the host arrived with; `start` resolves against it.
        let arrival = fragment_name(navigator.current_fragment());
        let journal = TransitionJournal::with_limit(options.config.journal_limit);
        Self {
            registry: StateRegistry::new(),
            cursor: 0,
            data: options.config.data.clone(),
            options,
            navigator,
            journal,
            arrival,
            listening: false,
            init_override: None,
        }
    }

    /// The configuration the handler was built with.
    pub fn config(&self) -> &HandlerConfig {
        &self.options.config
    }

    /// The shared payload as of the last committed transition.
    pub fn data(&self) -> &Payload {
        &self.data
    }

    /// Registered states in registration order.
    pub fn states(&self) -> &[StateRecord] {
        self.registry.records()
    }

    /// Number of registered states.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Whether no state is registered.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Cursor position, `None` while nothing is registered.
    pub fn current_index(&self) -> Option<usize> {
        (!self.registry.is_empty()).then_some(self.cursor)
    }

    /// The current state, `None` while nothing is registered.
    pub fn current_state(&self) -> Option<&StateRecord> {
        self.registry.get(self.cursor)
    }

    /// Committed transitions, oldest first, capped by
    /// [`HandlerConfig::journal_limit`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use stepwise::builder::HandlerBuilder;
    /// use stepwise::core::{StateDescriptor, TransitionKind};
    ///
    /// let mut handler = HandlerBuilder::new()
    ///     .journal_limit(Some(2))
    ///     .states(["a", "b", "c"].map(StateDescriptor::named))
    ///     .build()
    ///     .unwrap();
    ///
    /// handler.start().unwrap();
    /// handler.next().unwrap().next().unwrap();
    ///
    /// assert_eq!(handler.journal().get_path(), vec!["a", "b", "c"]);
    /// assert_eq!(handler.journal().last().map(|t| t.kind), Some(TransitionKind::Next));
    /// ```
    pub fn journal(&self) -> &TransitionJournal {
        &self.journal
    }

    /// The navigator transitions are published to.
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Mutable access to the navigator, e.g. to move a
    /// [`MemoryNavigator`](crate::navigation::MemoryNavigator) back.
    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    /// Whether `start` has wired the host notifications.
    pub fn is_started(&self) -> bool {
        self.listening
    }

    /// Register a state after the current tail.
    ///
    /// The first registered state becomes current and is published.
    pub fn add(&mut self, descriptor: StateDescriptor) -> Result<&mut Self, HandlerError> {
        let require_render = self.options.config.require_render;
        let record = self.registry.register(descriptor, require_render)?.clone();
        debug!(
            state = %record.name,
            position = self.registry.len() - 1,
            "registered state"
        );

        if self.registry.len() == 1 {
            self.cursor = 0;
            self.publish(&record);
        }
        Ok(self)
    }

    /// Remove a state, stitching its neighbors together.
    ///
    /// Removing a state at or before the cursor shifts the cursor left, so
    /// removing the current state makes its predecessor current (or its
    /// successor when it was first). No hooks run and nothing is published.
    pub fn remove(&mut self, name: &str) -> Result<StateRecord, HandlerError> {
        let (index, removed) = self.registry.remove(name)?;

        if index == self.cursor {
            warn!(state = name, "removed the current state");
        }
        if index <= self.cursor && self.cursor > 0 {
            self.cursor -= 1;
        }
        debug!(state = name, position = index, "removed state");
        Ok(removed)
    }

    /// Advance to the successor of the current state.
    ///
    /// Runs `toNext` on the leaving state, then `fromPrev` and `render` on
    /// the arriving one. Wraps to the first state when looping.
    pub fn next(&mut self) -> Result<&mut Self, HandlerError> {
        let current = self.require_current()?;
        let Some(target) = self
            .registry
            .successor(current, self.options.config.looping)
        else {
            return Err(HandlerError::NoNextState {
                current: self.record_at(current)?.name,
            });
        };

        self.step(
            current,
            target,
            [HookKind::ToNext, HookKind::FromPrev],
            TransitionKind::Next,
        )?;
        Ok(self)
    }

    /// Step back to the predecessor of the current state.
    ///
    /// Runs `toPrev` on the leaving state, then `fromNext` and `render` on
    /// the arriving one. Wraps to the last state when looping.
    pub fn prev(&mut self) -> Result<&mut Self, HandlerError> {
        let current = self.require_current()?;
        let Some(target) = self
            .registry
            .predecessor(current, self.options.config.looping)
        else {
            return Err(HandlerError::NoPrevState {
                current: self.record_at(current)?.name,
            });
        };

        self.step(
            current,
            target,
            [HookKind::ToPrev, HookKind::FromNext],
            TransitionKind::Prev,
        )?;
        Ok(self)
    }

    /// Jump directly to any registered state.
    ///
    /// `jumpOut` on the leaving state produces a candidate that is checked
    /// against the jump contract; `jumpIn` on the target is seeded from the
    /// contract payload itself, not from the candidate.
    pub fn jump_to(&mut self, name: &str) -> Result<&mut Self, HandlerError> {
        self.jump(name, Via::Consumer)?;
        Ok(self)
    }

    /// Enter a state the consumer arrived at from outside, e.g. a deep link.
    ///
    /// The configured `load` hook turns the ambient payload into a candidate
    /// for the jump contract, then the target runs `jumpIn` and `render`.
    pub fn load(&mut self, name: &str) -> Result<&mut Self, HandlerError> {
        let index = self.resolve(name)?;
        let target = self.record_at(index)?;
        let from = self.current_state().map(|state| state.name.clone());

        let candidate = self.run_lifecycle("load", &self.options.load, self.data.clone())?;
        self.check_contract(&target.name, &candidate, self.options.config.contract_policy)?;

        let payload = self.arrive(&target.name)?;
        self.commit(from, target, index, payload, TransitionKind::Load, true);
        Ok(self)
    }

    /// Re-run the current state's `resize` hook and merge the result.
    ///
    /// The cursor, the journal and the history are untouched.
    pub fn resize(&mut self) -> Result<&mut Self, HandlerError> {
        let current = self.require_current()?;
        let name = self.record_at(current)?.name;

        let payload = self
            .registry
            .invoke(&name, HookKind::Resize, self.data.clone())?;
        self.data.merge_in(payload);
        Ok(self)
    }

    /// Bootstrap the handler and start listening for host events.
    ///
    /// Without an arrival fragment, or when it names the first state, the
    /// configured `init` hook and the first state's `render` run. Otherwise
    /// the handler jumps to the state the fragment names.
    pub fn start(&mut self) -> Result<&mut Self, HandlerError> {
        self.begin(None)
    }

    /// Like [`start`](Self::start), with `init` replacing the configured hook.
    pub fn start_with<F>(&mut self, init: F) -> Result<&mut Self, HandlerError>
    where
        F: Fn(Payload) -> HookResult + Send + Sync + 'static,
    {
        self.begin(Some(Arc::new(init)))
    }

    /// Deliver a host notification. Ignored until `start` has run.
    pub fn dispatch(&mut self, event: HostEvent) -> Result<(), HandlerError> {
        if !self.listening {
            debug!(?event, "ignoring host event before start");
            return Ok(());
        }

        match event {
            HostEvent::Resize => self.resize().map(|_| ()),
            HostEvent::Navigate => self.navigated(),
        }
    }

    fn begin(&mut self, init: Option<Hook>) -> Result<&mut Self, HandlerError> {
        let first = self.record_at(0)?;
        self.init_override = init;

        match self.arrival.clone() {
            Some(name) if name != first.name => self.jump(&name, Via::Consumer)?,
            _ => self.bootstrap()?,
        }

        self.listening = true;
        debug!(state = ?self.current_state().map(|s| &s.name), "handler started");
        Ok(self)
    }

    /// The host moved through its history; follow it without republishing.
    ///
    /// The host cannot be refused at this point, so an enforced jump
    /// contract is downgraded to a warning.
    fn navigated(&mut self) -> Result<(), HandlerError> {
        if !self.navigator.has_history() {
            return self.bootstrap();
        }

        match fragment_name(self.navigator.current_fragment()) {
            Some(name) => self.jump(&name, Via::Host),
            None => self.bootstrap(),
        }
    }

    /// Initial load: `init`, then `render` of the first state.
    fn bootstrap(&mut self) -> Result<(), HandlerError> {
        let first = self.record_at(0)?;
        let init = self
            .init_override
            .clone()
            .unwrap_or_else(|| self.options.init.clone());

        let payload = self.run_lifecycle("init", &init, self.data.clone())?;
        let payload = self
            .registry
            .invoke(&first.name, HookKind::Render, payload)?;

        self.commit(None, first, 0, payload, TransitionKind::Init, true);
        Ok(())
    }

    fn jump(&mut self, name: &str, via: Via) -> Result<(), HandlerError> {
        let index = self.resolve(name)?;
        let current = self.require_current()?;
        let leaving = self.record_at(current)?;
        let target = self.record_at(index)?;

        let candidate = self
            .registry
            .invoke(&leaving.name, HookKind::JumpOut, self.data.clone())?;
        let policy = match (via, self.options.config.contract_policy) {
            (Via::Host, ContractPolicy::Enforce) => ContractPolicy::Warn,
            (_, policy) => policy,
        };
        self.check_contract(&target.name, &candidate, policy)?;

        let payload = self.arrive(&target.name)?;
        self.commit(
            Some(leaving.name),
            target,
            index,
            payload,
            TransitionKind::Jump,
            via == Via::Consumer,
        );
        Ok(())
    }

    /// `jumpIn` seeded from the contract, then `render`.
    fn arrive(&self, name: &str) -> Result<Payload, HandlerError> {
        let seed = self.options.contract.template().clone();
        let payload = self.registry.invoke(name, HookKind::JumpIn, seed)?;
        self.registry.invoke(name, HookKind::Render, payload)
    }

    fn step(
        &mut self,
        from: usize,
        to: usize,
        [leave, enter]: [HookKind; 2],
        kind: TransitionKind,
    ) -> Result<(), HandlerError> {
        let leaving = self.record_at(from)?;
        let target = self.record_at(to)?;

        let payload = self
            .registry
            .invoke(&leaving.name, leave, self.data.clone())?;
        let payload = self.registry.invoke(&target.name, enter, payload)?;
        let payload = self
            .registry
            .invoke(&target.name, HookKind::Render, payload)?;

        self.commit(Some(leaving.name), target, to, payload, kind, true);
        Ok(())
    }

    fn commit(
        &mut self,
        from: Option<String>,
        target: StateRecord,
        index: usize,
        payload: Payload,
        kind: TransitionKind,
        publish: bool,
    ) {
        self.data.merge_in(payload);
        self.cursor = index;

        debug!(
            from = from.as_deref().unwrap_or("-"),
            to = %target.name,
            %kind,
            "transition committed"
        );

        self.journal.push(TransitionRecord {
            from,
            to: target.name.clone(),
            kind,
            timestamp: Utc::now(),
        });
        if publish {
            self.publish(&target);
        }
    }

    fn publish(&mut self, record: &StateRecord) {
        if self.navigator.is_attached() {
            self.navigator.publish(record, &record.name, &record.url);
        }
    }

    fn check_contract(
        &self,
        state: &str,
        candidate: &Payload,
        policy: ContractPolicy,
    ) -> Result<(), HandlerError> {
        match policy {
            ContractPolicy::Lenient => Ok(()),
            ContractPolicy::Warn => {
                for violation in self.options.contract.violations(candidate) {
                    warn!(state, %violation, "jump contract violated");
                }
                Ok(())
            }
            ContractPolicy::Enforce => {
                let violations = self.options.contract.violations(candidate);
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(HandlerError::ContractViolated {
                        state: state.to_string(),
                        violations,
                    })
                }
            }
        }
    }

    fn run_lifecycle(
        &self,
        hook: &'static str,
        function: &Hook,
        payload: Payload,
    ) -> Result<Payload, HandlerError> {
        function(payload).map_err(|source: HookError| HandlerError::Lifecycle { hook, source })
    }

    fn resolve(&self, name: &str) -> Result<usize, HandlerError> {
        self.registry
            .position(name)
            .ok_or_else(|| HandlerError::StateNotFound {
                name: name.to_string(),
            })
    }

    fn require_current(&self) -> Result<usize, HandlerError> {
        self.current_index().ok_or(HandlerError::EmptyRegistry)
    }

    fn record_at(&self, index: usize) -> Result<StateRecord, HandlerError> {
        self.registry
            .get(index)
            .cloned()
            .ok_or(HandlerError::EmptyRegistry)
    }
}
