//! Collect Ball State
//!
//! Walk to the nearest free ball. Keeps tracking it by index across
//! snapshots, drops it when it stops being collectable, and on larger teams
//! switches to a clearly closer ball.

use super::announce;
use crate::fsm::State;
use crate::math::distance;
use crate::minion::{
    find_closest_available_ball, ClaimCheck, MinionContext, MinionPayload, MinionStateId,
    MinionTransition,
};
use crate::world::{BallInfo, BallState};

pub(in crate::minion) struct CollectBall {
    target: Option<BallInfo>,
    claims: ClaimCheck,
}

impl CollectBall {
    pub fn new() -> Self {
        Self { target: None, claims: ClaimCheck::new() }
    }

    /// Still worth chasing after a refresh, ignoring teammates
    fn is_collectable(ball: &BallInfo) -> bool {
        !ball.is_held && ball.reachable && matches!(ball.state, BallState::Neutral | BallState::Team)
    }

    fn should_switch(&mut self, ctx: &MinionContext, current: &BallInfo, closer: &BallInfo) -> bool {
        let behavior = &ctx.config.behavior;
        let here = ctx.agent.position();
        let clearly_closer = distance(&closer.position, &here)
            < distance(&current.position, &here) * behavior.ball_switch_ratio;

        // one ball per team: nearest wins
        if ctx.arena.balls_per_team() == 1 {
            return clearly_closer;
        }

        let aggressive = behavior.is_large_team(ctx.team_size())
            && ctx.agent.spawn_index() < behavior.aggressive_spawn_slots;
        let unclaimed = !self.claims.is_claimed_by_teammate(ctx, closer.index);
        let better = matches!(closer.state, BallState::Neutral | BallState::Team);

        unclaimed && (aggressive || closer.state != BallState::Opponent) && better && clearly_closer
    }
}

impl State<MinionStateId, MinionContext, MinionPayload> for CollectBall {
    fn id(&self) -> MinionStateId {
        MinionStateId::CollectBall
    }

    fn enter(&mut self, ctx: &MinionContext, _payload: Option<MinionPayload>) {
        announce(ctx, self.id());
        self.target = find_closest_available_ball(ctx.balls().iter(), &ctx.agent.position());
        if let Some(ball) = self.target {
            ctx.go_to(ball.position, "ball");
        }
    }

    fn update(&mut self, ctx: &MinionContext) -> Option<MinionTransition> {
        // a ball may be picked up on the way to another one
        if ctx.agent.has_ball() {
            return Some(MinionTransition::to(MinionStateId::GoToThrowSpot));
        }

        let behavior = &ctx.config.behavior;
        let early_game = ctx.now() < behavior.early_game_secs;
        let guard_claims = behavior.is_large_team(ctx.team_size()) && !early_game;
        let balls = ctx.balls();
        let here = ctx.agent.position();

        // ball left to a teammate this tick
        let mut yielded = None;
        if let Some(tracked) = self.target {
            self.target = balls
                .iter()
                .find(|b| b.index == tracked.index)
                .copied()
                .filter(Self::is_collectable);
            if let Some(ball) = self.target {
                if guard_claims && self.claims.is_claimed_by_teammate(ctx, ball.index) {
                    log::debug!("agent {} leaves ball {} to a teammate", ctx.agent.id(), ball.index);
                    yielded = Some(ball.index);
                    self.target = None;
                }
            }
        }

        if let Some(ball) = self.target {
            ctx.go_to(ball.nav_position, "ball");
            if ctx.team_size() >= behavior.switch_team_size {
                if let Some(closer) = find_closest_available_ball(balls.iter(), &here) {
                    if self.should_switch(ctx, &ball, &closer) {
                        log::debug!("agent {} switches to ball {}", ctx.agent.id(), closer.index);
                        self.target = Some(closer);
                        ctx.go_to(closer.nav_position, "ball");
                    }
                }
            }
            return None;
        }

        let candidates = balls.iter().filter(|b| Some(b.index) != yielded);
        if let Some(ball) = find_closest_available_ball(candidates, &here) {
            self.target = Some(ball);
            ctx.go_to(ball.nav_position, "ball");
            return None;
        }

        Some(MinionTransition::to(MinionStateId::DefensiveEvasion))
    }
}
