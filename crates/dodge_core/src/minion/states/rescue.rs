//! Rescue State
//!
//! Throw the held ball to a confined teammate so it can leave confinement.

use std::rc::Rc;

use super::announce;
use crate::fsm::State;
use crate::minion::{find_rescuable_teammate, MinionContext, MinionPayload, MinionStateId, MinionTransition};
use crate::shot_selection::plan_throw;
use crate::world::{Agent, AgentId};

pub(in crate::minion) struct Rescue {
    teammate: Option<AgentId>,
}

impl Rescue {
    pub fn new() -> Self {
        Self { teammate: None }
    }

    /// The entry teammate while it still needs help, else whoever does now
    fn resolve_teammate(&mut self, ctx: &MinionContext) -> Option<Rc<dyn Agent>> {
        let current = self
            .teammate
            .and_then(|id| ctx.team_cache.member(id))
            .filter(|mate| mate.can_be_rescued());
        let mate = current.or_else(|| find_rescuable_teammate(&ctx.team_cache))?;
        self.teammate = Some(mate.id());
        Some(mate)
    }
}

impl State<MinionStateId, MinionContext, MinionPayload> for Rescue {
    fn id(&self) -> MinionStateId {
        MinionStateId::Rescue
    }

    fn accepts(&self, payload: Option<&MinionPayload>) -> bool {
        matches!(payload, Some(MinionPayload::Rescue { .. }))
    }

    fn enter(&mut self, ctx: &MinionContext, payload: Option<MinionPayload>) {
        announce(ctx, self.id());
        self.teammate = payload.map(|MinionPayload::Rescue { teammate }| teammate);
        if let Some(mate) = self.teammate.and_then(|id| ctx.team_cache.member(id)) {
            ctx.agent.face_towards(mate.position());
        }
    }

    fn update(&mut self, ctx: &MinionContext) -> Option<MinionTransition> {
        if !ctx.agent.has_ball() {
            return Some(MinionTransition::to(MinionStateId::CollectBall));
        }

        let Some(mate) = self.resolve_teammate(ctx) else {
            return Some(MinionTransition::to(MinionStateId::ThrowBall));
        };

        let plan = plan_throw(
            ctx.agent.as_ref(),
            mate.position(),
            mate.velocity(),
            mate.forward(),
            ctx.arena.gravity(),
            &ctx.config,
        );
        let Some(plan) = plan else {
            ctx.agent.face_towards(mate.position());
            return None;
        };

        ctx.agent.face_towards_for_throw(plan.intercept_pos);
        if ctx.agent.throw_ball(plan.direction, plan.normalized_speed) {
            log::debug!("agent {} threw a rescue ball to {}", ctx.agent.id(), mate.id());
            return Some(MinionTransition::to(MinionStateId::CollectBall));
        }
        None
    }
}
