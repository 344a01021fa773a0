//! Throw Ball State
//!
//! Hold position at the throw spot, keep turning toward the predicted
//! intercept of the target opponent and release once aligned.

use super::announce;
use crate::fsm::State;
use crate::minion::{MinionContext, MinionPayload, MinionStateId, MinionTransition};
use crate::shot_selection::{resolve_opponent, select_throw, ShotDecision};

pub(in crate::minion) struct ThrowBall {
    opponent: Option<usize>,
}

impl ThrowBall {
    pub fn new() -> Self {
        Self { opponent: None }
    }
}

impl State<MinionStateId, MinionContext, MinionPayload> for ThrowBall {
    fn id(&self) -> MinionStateId {
        MinionStateId::ThrowBall
    }

    fn enter(&mut self, ctx: &MinionContext, _payload: Option<MinionPayload>) {
        announce(ctx, self.id());
        self.opponent = ctx.arena.closest_non_confined_opponent(ctx.agent.position(), ctx.team);
        if let Some(info) = self.opponent.and_then(|index| ctx.arena.opponent_info(ctx.team, index)) {
            ctx.agent.face_towards(info.position);
        }
    }

    fn update(&mut self, ctx: &MinionContext) -> Option<MinionTransition> {
        if !ctx.agent.has_ball() {
            return Some(MinionTransition::to(MinionStateId::CollectBall));
        }

        let target = resolve_opponent(ctx.arena.as_ref(), ctx.team, ctx.agent.position(), self.opponent);
        let Some(target) = target else {
            self.opponent = None;
            return Some(MinionTransition::to(MinionStateId::DefensiveEvasion));
        };
        self.opponent = Some(target.index);

        match select_throw(ctx.agent.as_ref(), &target, ctx.arena.gravity(), &ctx.config) {
            ShotDecision::Throw(plan) => {
                ctx.agent.face_towards_for_throw(plan.intercept_pos);
                if ctx.agent.throw_ball(plan.direction, plan.normalized_speed) {
                    log::debug!(
                        "agent {} threw at opponent {} (t={:.2}s, speed {:.1})",
                        ctx.agent.id(),
                        target.index,
                        plan.intercept_t,
                        plan.speed
                    );
                    return Some(MinionTransition::to(MinionStateId::CollectBall));
                }
            }
            ShotDecision::Aim { intercept_pos } => ctx.agent.face_towards_for_throw(intercept_pos),
            ShotDecision::TargetingFailed => ctx.agent.face_towards_for_throw(target.position),
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec3;
    use crate::testing::{opponent, rig};

    #[test]
    fn test_enter_faces_closest_opponent() {
        let rig = rig(2, 1);
        rig.arena.opponents.borrow_mut().extend([
            opponent(0, vec3(5.0, 0.0, 10.0)),
            opponent(1, vec3(0.0, 0.0, 2.0)),
        ]);

        let mut state = ThrowBall::new();
        state.enter(&rig.ctx, None);
        assert_eq!(state.opponent, Some(1));
        assert_eq!(rig.agent.facings.borrow().last(), Some(&vec3(0.0, 0.0, 2.0)));
        assert_eq!(rig.agent.last_text().as_deref(), Some("ThrowBall"));
    }

    #[test]
    fn test_aligned_throw_releases_ball() {
        let rig = rig(2, 1);
        rig.arena.opponents.borrow_mut().push(opponent(0, vec3(0.0, 0.0, 2.0)));
        rig.agent.has_ball.set(true);

        let mut state = ThrowBall::new();
        state.enter(&rig.ctx, None);
        assert_eq!(state.update(&rig.ctx).map(|t| t.target), Some(MinionStateId::CollectBall));
        assert_eq!(rig.agent.throws.borrow().len(), 1);
    }

    #[test]
    fn test_misaligned_agent_turns_first() {
        let rig = rig(2, 1);
        rig.arena.opponents.borrow_mut().push(opponent(0, vec3(8.0, 0.0, -12.0)));
        rig.agent.has_ball.set(true);
        rig.agent.forward.set(vec3(0.0, 0.0, 1.0));

        let mut state = ThrowBall::new();
        state.enter(&rig.ctx, None);
        assert!(state.update(&rig.ctx).is_none());
        assert!(rig.agent.throws.borrow().is_empty());

        // the fake turns instantly, so the next tick releases
        assert_eq!(state.update(&rig.ctx).map(|t| t.target), Some(MinionStateId::CollectBall));
    }

    #[test]
    fn test_out_of_range_keeps_facing_opponent() {
        let rig = rig(2, 1);
        rig.arena.opponents.borrow_mut().push(opponent(0, vec3(0.0, 0.0, 60.0)));
        rig.agent.has_ball.set(true);

        let mut state = ThrowBall::new();
        state.enter(&rig.ctx, None);
        assert!(state.update(&rig.ctx).is_none());
        assert_eq!(rig.agent.facings.borrow().last(), Some(&vec3(0.0, 0.0, 60.0)));
    }

    #[test]
    fn test_retargets_when_opponent_confined() {
        let rig = rig(2, 1);
        rig.arena.opponents.borrow_mut().extend([
            opponent(0, vec3(0.0, 0.0, 2.0)),
            opponent(1, vec3(60.0, 0.0, 2.0)),
        ]);
        rig.agent.has_ball.set(true);

        let mut state = ThrowBall::new();
        state.enter(&rig.ctx, None);
        rig.arena.opponents.borrow_mut()[0].is_confined = true;
        state.update(&rig.ctx);
        assert_eq!(state.opponent, Some(1));
    }

    #[test]
    fn test_no_opponent_falls_back_to_defence() {
        let rig = rig(2, 1);
        rig.agent.has_ball.set(true);
        let mut state = ThrowBall::new();
        state.enter(&rig.ctx, None);
        assert_eq!(state.update(&rig.ctx).map(|t| t.target), Some(MinionStateId::DefensiveEvasion));
    }

    #[test]
    fn test_lost_ball_goes_back_to_collecting() {
        let rig = rig(2, 1);
        let mut state = ThrowBall::new();
        state.enter(&rig.ctx, None);
        assert_eq!(state.update(&rig.ctx).map(|t| t.target), Some(MinionStateId::CollectBall));
    }
}
