//! Lifecycle hooks and the normalized per-state hook table.
//!
//! Every hook is a function from payload to payload. Hooks a state does not
//! supply are filled in with the identity function at registration time, so
//! the transition machinery always invokes a hook and never branches on its
//! presence.

use super::payload::Payload;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Error raised by a hook. It aborts the transition it occurred in.
#[derive(Debug, Error)]
pub enum HookError {
    /// The hook refused the payload.
    #[error("{0}")]
    Failed(String),

    /// A payload field did not have the shape the hook expected, typically
    /// from `serde_json::from_value(..)?` inside the hook.
    #[error("payload field could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl HookError {
    /// Failure with a free-form message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Outcome of a hook invocation.
pub type HookResult = Result<Payload, HookError>;

/// Shared hook function.
pub type Hook = Arc<dyn Fn(Payload) -> HookResult + Send + Sync>;

/// Hook that returns its input unchanged.
pub fn identity() -> Hook {
    Arc::new(|payload: Payload| -> HookResult { Ok(payload) })
}

/// The points in a transition where a hook runs.
///
/// The `nextOut`/`nextIn`/`prevOut`/`prevIn` names of the indexed variant are
/// aliases onto `ToNext`/`FromPrev`/`ToPrev`/`FromNext`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HookKind {
    Render,
    Resize,
    ToNext,
    ToPrev,
    FromNext,
    FromPrev,
    JumpOut,
    JumpIn,
}

impl HookKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Render => "render",
            Self::Resize => "resize",
            Self::ToNext => "toNext",
            Self::ToPrev => "toPrev",
            Self::FromNext => "fromNext",
            Self::FromPrev => "fromPrev",
            Self::JumpOut => "jumpOut",
            Self::JumpIn => "jumpIn",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully populated hook table for one registered state.
#[derive(Clone)]
pub struct HookSet {
    render: Hook,
    resize: Hook,
    to_next: Hook,
    to_prev: Hook,
    from_next: Hook,
    from_prev: Hook,
    jump_out: Hook,
    jump_in: Hook,
    has_render: bool,
}

impl HookSet {
    /// Build the table from whatever hooks a descriptor supplied.
    ///
    /// `resize` falls back to `render` before falling back to identity.
    pub fn normalize(mut supplied: BTreeMap<HookKind, Hook>) -> Self {
        let mut take = |kind: HookKind| supplied.remove(&kind);

        let render = take(HookKind::Render);
        let has_render = render.is_some();
        let resize = take(HookKind::Resize).or_else(|| render.clone());

        Self {
            render: render.unwrap_or_else(identity),
            resize: resize.unwrap_or_else(identity),
            to_next: take(HookKind::ToNext).unwrap_or_else(identity),
            to_prev: take(HookKind::ToPrev).unwrap_or_else(identity),
            from_next: take(HookKind::FromNext).unwrap_or_else(identity),
            from_prev: take(HookKind::FromPrev).unwrap_or_else(identity),
            jump_out: take(HookKind::JumpOut).unwrap_or_else(identity),
            jump_in: take(HookKind::JumpIn).unwrap_or_else(identity),
            has_render,
        }
    }

    /// The hook run at `kind`, identity when the state supplied none.
    pub fn get(&self, kind: HookKind) -> &Hook {
        match kind {
            HookKind::Render => &self.render,
            HookKind::Resize => &self.resize,
            HookKind::ToNext => &self.to_next,
            HookKind::ToPrev => &self.to_prev,
            HookKind::FromNext => &self.from_next,
            HookKind::FromPrev => &self.from_prev,
            HookKind::JumpOut => &self.jump_out,
            HookKind::JumpIn => &self.jump_in,
        }
    }

    /// Whether the state supplied its own `render`.
    pub fn has_render(&self) -> bool {
        self.has_render
    }

    pub fn call(&self, kind: HookKind, payload: Payload) -> HookResult {
        (self.get(kind))(payload)
    }
}

impl fmt::Debug for HookSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookSet")
            .field("has_render", &self.has_render)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setter(key: &'static str) -> Hook {
        Arc::new(move |p: Payload| -> HookResult { Ok(p.with(key, true)) })
    }

    #[test]
    fn missing_hooks_are_identity() {
        let hooks = HookSet::normalize(BTreeMap::new());
        let payload = Payload::new().with("x", 1);

        for kind in [
            HookKind::Render,
            HookKind::Resize,
            HookKind::ToNext,
            HookKind::ToPrev,
            HookKind::FromNext,
            HookKind::FromPrev,
            HookKind::JumpOut,
            HookKind::JumpIn,
        ] {
            assert_eq!(hooks.call(kind, payload.clone()).unwrap(), payload);
        }
        assert!(!hooks.has_render());
    }

    #[test]
    fn resize_defaults_to_render() {
        let mut supplied = BTreeMap::new();
        supplied.insert(HookKind::Render, setter("rendered"));
        let hooks = HookSet::normalize(supplied);

        let out = hooks.call(HookKind::Resize, Payload::new()).unwrap();
        assert_eq!(out.get_bool("rendered"), Some(true));
        assert!(hooks.has_render());
    }

    #[test]
    fn explicit_resize_wins_over_render() {
        let mut supplied = BTreeMap::new();
        supplied.insert(HookKind::Render, setter("rendered"));
        supplied.insert(HookKind::Resize, setter("resized"));
        let hooks = HookSet::normalize(supplied);

        let out = hooks.call(HookKind::Resize, Payload::new()).unwrap();
        assert_eq!(out.get_bool("resized"), Some(true));
        assert!(!out.contains_key("rendered"));
    }

    #[test]
    fn hook_errors_pass_through() {
        let mut supplied: BTreeMap<HookKind, Hook> = BTreeMap::new();
        supplied.insert(
            HookKind::JumpIn,
            Arc::new(|_: Payload| -> HookResult { Err(HookError::new("refused")) }),
        );
        let hooks = HookSet::normalize(supplied);

        let err = hooks.call(HookKind::JumpIn, Payload::new()).unwrap_err();
        assert_eq!(err.to_string(), "refused");
    }

    #[test]
    fn decode_errors_convert_with_question_mark() {
        let parse = |p: Payload| -> HookResult {
            let count: u8 = serde_json::from_value(p.get("count").cloned().unwrap_or_default())?;
            Ok(p.with("count", count + 1))
        };

        assert!(matches!(
            parse(Payload::new().with("count", "many")),
            Err(HookError::Decode(_))
        ));
        assert_eq!(
            parse(Payload::new().with("count", 1)).unwrap().get("count"),
            Some(&2.into())
        );
    }

    #[test]
    fn hook_kind_names_match_lifecycle_names() {
        assert_eq!(HookKind::ToNext.to_string(), "toNext");
        assert_eq!(HookKind::FromPrev.as_str(), "fromPrev");
    }
}
