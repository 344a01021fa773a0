//! # dodge_core - Dodgeball Agent Decision Engine
//!
//! Per-tick decision logic for autonomous agents in a team dodgeball match
//! with a confinement zone.
//!
//! ## Features
//! - Generic finite state machine with a pre-emptive global transition layer
//! - Ballistic intercept solver (closed form without gravity, bounded
//!   fixed-point iteration with gravity)
//! - Shot selection policy on top of the solver
//! - Per-team ball snapshot cache keyed by simulation tick
//! - Complete minion behaviour set (collect, approach, throw, rescue, evade,
//!   confinement, rest)
//!
//! Movement, navigation and world queries are provided by the host through the
//! [`world::Agent`] and [`world::Arena`] traits.

// Game AI APIs often require many parameters for physics, state, etc.
#![allow(clippy::too_many_arguments)]

pub mod ballistics;
pub mod config;
pub mod error;
pub mod fsm;
pub mod math;
pub mod minion;
pub mod shot_selection;
pub mod team;
pub mod world;

#[cfg(test)]
mod testing;

pub use ballistics::{solve_intercept, InterceptQuery, InterceptSolution};
pub use config::{BehaviorConfig, BrainConfig, ShotConfig, SolverConfig};
pub use error::{BrainError, ConfigError, FsmError, Result, TeamError};
pub use fsm::{GlobalTransitions, State, StateMachine, Transition, TransitionRecord};
pub use math::Vec3;
pub use minion::{MinionBrain, MinionContext, MinionPayload, MinionStateId};
pub use shot_selection::{plan_throw, resolve_opponent, select_throw, ShotDecision, ShotPlan};
pub use team::{TeamCache, TeamCacheRegistry};
pub use world::{
    Agent, AgentId, Arena, BallInfo, BallState, EvasionDirection, Landmark, OpponentInfo,
    SimClock, Team,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
