//! Finite State Machine
//!
//! Generic dispatcher with a pre-emptive global transition layer.
//!
//! ## Per-tick order
//! ```text
//! GlobalTransitions::evaluate ──Some──► switch (exit(global=true)) ► stop
//!          │None
//!          ▼
//! active State::update ─────────Some──► switch (exit(global=false))
//!          │None
//!          ▼
//!      no change
//! ```
//!
//! A state is never updated on the tick it was entered. States are keyed by a
//! small `Copy` identifier (normally an enum) and may receive a typed payload
//! on entry; payloads are checked against [`State::accepts`] before the
//! current state is exited.

mod machine;
mod state;
mod transition;

pub use machine::StateMachine;
pub use state::{GlobalTransitions, State};
pub use transition::{Transition, TransitionRecord};
