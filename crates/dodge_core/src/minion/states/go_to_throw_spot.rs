//! Go To Throw Spot State

use super::announce;
use crate::fsm::State;
use crate::math::{horizontal, lerp, normalize_or_zero, Vec3};
use crate::minion::{find_rescuable_teammate, MinionContext, MinionPayload, MinionStateId, MinionTransition};
use crate::world::Landmark;

pub(in crate::minion) struct GoToThrowSpot;

/// Point between home and the advance line. Large teams push further up with
/// a ball, hang back without one, and fan out across the court by spawn slot.
fn throw_spot(ctx: &MinionContext) -> Vec3 {
    let behavior = &ctx.config.behavior;
    let home = ctx.landmark(Landmark::Home);
    let advance = ctx.landmark(Landmark::Advance);
    let team_size = ctx.team_size();

    if !behavior.is_large_team(team_size) {
        return lerp(&home, &advance, behavior.advance_ratio);
    }

    let ratio = if ctx.agent.has_ball() {
        behavior.advance_ratio_with_ball
    } else {
        behavior.advance_ratio_without_ball
    };
    let right = normalize_or_zero(&horizontal(&(ctx.landmark(Landmark::ConfinementEntryRight) - home)));
    let slot = ctx.agent.spawn_index() as f32 / team_size as f32;
    let offset = behavior.spread_width * slot - behavior.spread_width / 2.0;

    lerp(&home, &advance, ratio) + right * offset
}

impl State<MinionStateId, MinionContext, MinionPayload> for GoToThrowSpot {
    fn id(&self) -> MinionStateId {
        MinionStateId::GoToThrowSpot
    }

    fn enter(&mut self, ctx: &MinionContext, _payload: Option<MinionPayload>) {
        announce(ctx, self.id());
        ctx.go_to(throw_spot(ctx), "throw spot");
    }

    fn update(&mut self, ctx: &MinionContext) -> Option<MinionTransition> {
        if !ctx.agent.has_ball() {
            return Some(MinionTransition::to(MinionStateId::CollectBall));
        }
        if !ctx.agent.reached_target() {
            return None;
        }

        match find_rescuable_teammate(&ctx.team_cache) {
            Some(mate) => Some(MinionTransition::with_payload(
                MinionStateId::Rescue,
                MinionPayload::Rescue { teammate: mate.id() },
            )),
            None => Some(MinionTransition::to(MinionStateId::ThrowBall)),
        }
    }
}
