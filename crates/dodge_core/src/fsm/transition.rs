use serde::{Deserialize, Serialize};

/// Request to switch to `target`, created by a state or the global layer and
/// consumed by the machine on the same tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<K, P = ()> {
    pub target: K,
    pub payload: Option<P>,
    pub is_global: bool,
}

impl<K, P> Transition<K, P> {
    pub fn to(target: K) -> Self {
        Self { target, payload: None, is_global: false }
    }

    pub fn with_payload(target: K, payload: P) -> Self {
        Self { target, payload: Some(payload), is_global: false }
    }

    /// Mark as pre-emptive
    pub fn global(mut self) -> Self {
        self.is_global = true;
        self
    }
}

/// A switch applied by [`super::StateMachine::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord<K> {
    pub from: K,
    pub to: K,
    pub global: bool,
}
