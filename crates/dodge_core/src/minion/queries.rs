//! Queries shared by several minion states

use std::rc::Rc;

use super::MinionContext;
use crate::math::{distance, Vec3};
use crate::team::TeamCache;
use crate::world::{Agent, BallInfo};

/// Nearest ball that is free to pick up (not held, neutral, reachable).
pub fn find_closest_available_ball<'a>(
    balls: impl IntoIterator<Item = &'a BallInfo>,
    from: &Vec3,
) -> Option<BallInfo> {
    balls
        .into_iter()
        .filter(|b| b.is_available())
        .min_by(|a, b| distance(&a.position, from).total_cmp(&distance(&b.position, from)))
        .copied()
}

/// First registered teammate waiting to be rescued
pub fn find_rescuable_teammate(cache: &TeamCache) -> Option<Rc<dyn Agent>> {
    cache.members().into_iter().find(|m| m.can_be_rescued())
}

/// Throttled "is another teammate already after this ball" check.
///
/// Between checks the answer is `false`.
#[derive(Debug, Clone, Default)]
pub struct ClaimCheck {
    last_check: Option<f32>,
}

impl ClaimCheck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_claimed_by_teammate(&mut self, ctx: &MinionContext, ball_index: usize) -> bool {
        let now = ctx.now();
        let interval = ctx.config.behavior.claim_check_interval(ctx.team_size());
        if let Some(last) = self.last_check {
            if now - last < interval {
                return false;
            }
        }
        self.last_check = Some(now);

        let me = ctx.agent.id();
        ctx.team_cache
            .members()
            .iter()
            .any(|mate| mate.id() != me && mate.tracked_ball() == Some(ball_index))
    }
}
