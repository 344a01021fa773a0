//! Trait definitions for state handling

use super::Transition;

/// A behavioural unit of the state machine.
///
/// - `K`: state identifier
/// - `C`: shared context, immutable for the machine's lifetime
/// - `P`: entry payload type
///
/// Private fields of a state survive between updates but must be reset by
/// [`State::enter`].
pub trait State<K, C, P = ()> {
    fn id(&self) -> K;

    /// Whether this state can be entered with `payload`.
    ///
    /// Default: only without a payload.
    fn accepts(&self, payload: Option<&P>) -> bool {
        payload.is_none()
    }

    /// Called once when the state becomes active
    fn enter(&mut self, ctx: &C, payload: Option<P>);

    /// Called at most once per tick while active, never on the entry tick
    fn update(&mut self, ctx: &C) -> Option<Transition<K, P>>;

    /// Called once when leaving, before the next state's `enter`.
    /// `global` is true when the switch was forced by the global layer.
    fn exit(&mut self, _ctx: &C, _global: bool) {}
}

/// Observer polled before the active state every tick.
///
/// Never entered or exited. It may only request transitions; requests are
/// always applied as global.
pub trait GlobalTransitions<K, C, P = ()> {
    fn evaluate(&mut self, ctx: &C, active: K) -> Option<Transition<K, P>>;
}
