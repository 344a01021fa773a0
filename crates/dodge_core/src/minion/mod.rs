//! # Minion Brain
//!
//! The dodgeball agent's behaviour set wired into the generic
//! [`StateMachine`]: nine states plus the global evaluator that handles
//! match end and confinement.
//!
//! ## State graph
//! ```text
//! CollectBall ──has ball──► GoToThrowSpot ──reached──► ThrowBall ──thrown──► CollectBall
//!      │                          └──teammate confined──► Rescue ──thrown──► CollectBall
//!      └──no ball available──► DefensiveEvasion ──ball appears──► CollectBall
//!
//! (global) confined ─► GoToConfinement ─released─► LeaveConfinement ─► GoHome / GoToThrowSpot
//! (global) match over ─► Rest
//! ```

mod queries;
mod states;

pub use queries::{find_closest_available_ball, find_rescuable_teammate, ClaimCheck};

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::config::BrainConfig;
use crate::error::{BrainError, Result};
use crate::fsm::{StateMachine, Transition, TransitionRecord};
use crate::math::Vec3;
use crate::team::{TeamCache, TeamCacheRegistry};
use crate::world::{Agent, AgentId, Arena, BallInfo, Landmark, SimClock, Team};

use states::{
    CollectBall, DefensiveEvasion, GlobalEvaluator, GoHome, GoToConfinement, GoToThrowSpot,
    LeaveConfinement, Rescue, Rest, ThrowBall,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MinionStateId {
    CollectBall,
    GoToThrowSpot,
    Rescue,
    ThrowBall,
    DefensiveEvasion,
    GoToConfinement,
    LeaveConfinement,
    GoHome,
    Rest,
}

impl MinionStateId {
    pub const ALL: [MinionStateId; 9] = [
        MinionStateId::CollectBall,
        MinionStateId::GoToThrowSpot,
        MinionStateId::Rescue,
        MinionStateId::ThrowBall,
        MinionStateId::DefensiveEvasion,
        MinionStateId::GoToConfinement,
        MinionStateId::LeaveConfinement,
        MinionStateId::GoHome,
        MinionStateId::Rest,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MinionStateId::CollectBall => "CollectBall",
            MinionStateId::GoToThrowSpot => "GoToThrowSpot",
            MinionStateId::Rescue => "Rescue",
            MinionStateId::ThrowBall => "ThrowBall",
            MinionStateId::DefensiveEvasion => "DefensiveEvasion",
            MinionStateId::GoToConfinement => "GoToConfinement",
            MinionStateId::LeaveConfinement => "LeaveConfinement",
            MinionStateId::GoHome => "GoHome",
            MinionStateId::Rest => "Rest",
        }
    }
}

impl fmt::Display for MinionStateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Entry payloads of the minion states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinionPayload {
    /// Teammate to free from confinement
    Rescue { teammate: AgentId },
}

pub type MinionTransition = Transition<MinionStateId, MinionPayload>;
pub type MinionMachine = StateMachine<MinionStateId, MinionContext, MinionPayload>;

/// Everything a minion state can see. Fixed for the machine's lifetime.
pub struct MinionContext {
    pub agent: Rc<dyn Agent>,
    pub arena: Rc<dyn Arena>,
    pub team: Team,
    pub team_cache: Rc<TeamCache>,
    pub clock: Rc<SimClock>,
    pub config: BrainConfig,
}

impl MinionContext {
    /// Ball snapshot for the current tick
    pub fn balls(&self) -> Rc<[BallInfo]> {
        self.team_cache.balls(self.arena.as_ref(), self.clock.tick())
    }

    pub fn landmark(&self, landmark: Landmark) -> Vec3 {
        self.arena.landmark(self.team, landmark)
    }

    pub fn now(&self) -> f32 {
        self.clock.elapsed_secs()
    }

    pub fn team_size(&self) -> usize {
        self.arena.team_size()
    }

    /// Navigate, warning when no path exists
    pub fn go_to(&self, target: Vec3, purpose: &str) -> bool {
        let reachable = self.agent.go_to(target);
        if !reachable {
            log::warn!("agent {} could not find a path to {} at {:?}", self.agent.id(), purpose, target);
        }
        reachable
    }
}

/// One agent's decision maker.
pub struct MinionBrain {
    machine: MinionMachine,
}

impl MinionBrain {
    /// Register the agent with its team cache and build the state machine.
    pub fn new(
        agent: Rc<dyn Agent>,
        arena: Rc<dyn Arena>,
        clock: Rc<SimClock>,
        registry: &mut TeamCacheRegistry,
        config: BrainConfig,
    ) -> std::result::Result<Self, BrainError> {
        let team = agent.team();
        let team_cache = registry.get_or_create(team, arena.as_ref());
        team_cache.register(Rc::clone(&agent))?;

        let seed = config.behavior.rng_seed ^ u64::from(agent.id().0);
        let context = MinionContext { agent, arena, team, team_cache, clock, config };

        let mut machine = StateMachine::new(context);
        machine.set_global_transitions(GlobalEvaluator::new());
        machine.add_state(CollectBall::new(), true)?;
        machine.add_state(GoToThrowSpot, false)?;
        machine.add_state(ThrowBall::new(), false)?;
        machine.add_state(DefensiveEvasion::new(seed), false)?;
        machine.add_state(GoToConfinement::new(), false)?;
        machine.add_state(LeaveConfinement::new(), false)?;
        machine.add_state(GoHome, false)?;
        machine.add_state(Rescue::new(), false)?;
        machine.add_state(Rest, false)?;

        Ok(Self { machine })
    }

    /// Run one tick. Does nothing until the whole team has registered.
    pub fn update(&mut self) -> Result<Option<TransitionRecord<MinionStateId>>> {
        if !self.machine.context().team_cache.is_fully_initialized() {
            return Ok(None);
        }

        self.machine.update().map_err(|err| {
            log::error!("agent {}: {}", self.machine.context().agent.id(), err);
            err
        })
    }

    pub fn current_state(&self) -> Option<MinionStateId> {
        self.machine.current_state()
    }

    pub fn agent_id(&self) -> AgentId {
        self.machine.context().agent.id()
    }

    pub fn context(&self) -> &MinionContext {
        self.machine.context()
    }
}
