//! Home and Rest States

use super::announce;
use crate::fsm::State;
use crate::minion::{MinionContext, MinionPayload, MinionStateId, MinionTransition};
use crate::world::Landmark;

/// Walk back to the home landmark, then look for a ball.
pub(in crate::minion) struct GoHome;

impl State<MinionStateId, MinionContext, MinionPayload> for GoHome {
    fn id(&self) -> MinionStateId {
        MinionStateId::GoHome
    }

    fn enter(&mut self, ctx: &MinionContext, _payload: Option<MinionPayload>) {
        announce(ctx, self.id());
        ctx.go_to(ctx.landmark(Landmark::Home), "home");
    }

    fn update(&mut self, ctx: &MinionContext) -> Option<MinionTransition> {
        if ctx.agent.reached_target() {
            return Some(MinionTransition::to(MinionStateId::CollectBall));
        }
        None
    }
}

/// Terminal state once the match is over.
pub(in crate::minion) struct Rest;

impl State<MinionStateId, MinionContext, MinionPayload> for Rest {
    fn id(&self) -> MinionStateId {
        MinionStateId::Rest
    }

    fn enter(&mut self, ctx: &MinionContext, _payload: Option<MinionPayload>) {
        announce(ctx, self.id());
        ctx.go_to(ctx.landmark(Landmark::Home), "home");
    }

    fn update(&mut self, _ctx: &MinionContext) -> Option<MinionTransition> {
        None
    }
}
