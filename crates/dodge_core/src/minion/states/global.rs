//! Global evaluator
//!
//! Runs before the active state every tick. Match end wins over everything;
//! confinement is edge-triggered so the confinement states can run their own
//! waypoint logic without being re-entered each tick.

use crate::fsm::GlobalTransitions;
use crate::minion::{MinionContext, MinionPayload, MinionStateId, MinionTransition};

pub(in crate::minion) struct GlobalEvaluator {
    was_confined: bool,
}

impl GlobalEvaluator {
    pub fn new() -> Self {
        Self { was_confined: false }
    }
}

impl GlobalTransitions<MinionStateId, MinionContext, MinionPayload> for GlobalEvaluator {
    fn evaluate(&mut self, ctx: &MinionContext, active: MinionStateId) -> Option<MinionTransition> {
        if ctx.arena.is_match_over() {
            if active == MinionStateId::Rest {
                return None;
            }
            return Some(MinionTransition::to(MinionStateId::Rest));
        }

        let confined = ctx.agent.is_confined();
        if confined && !self.was_confined {
            self.was_confined = true;
            return Some(MinionTransition::to(MinionStateId::GoToConfinement));
        }
        if !confined {
            self.was_confined = false;
        }
        None
    }
}
