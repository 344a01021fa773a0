//! Defensive Evasion State
//!
//! Idle behaviour while no ball is free: wander around the home area, pause
//! facing the confinement zone, and sidestep at random intervals.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::announce;
use crate::fsm::State;
use crate::math::{lerp_scalar, vec3};
use crate::minion::{find_closest_available_ball, MinionContext, MinionPayload, MinionStateId, MinionTransition};
use crate::world::{EvasionDirection, Landmark};

/// Active pause at a wander point
#[derive(Debug, Clone, Copy)]
struct Pause {
    start: f32,
    duration: f32,
}

pub(in crate::minion) struct DefensiveEvasion {
    rng: ChaCha8Rng,
    last_evade: f32,
    evade_period: f32,
    pause: Option<Pause>,
}

impl DefensiveEvasion {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            last_evade: 0.0,
            evade_period: 0.0,
            pause: None,
        }
    }

    fn wander(&mut self, ctx: &MinionContext) {
        let radius = ctx.config.behavior.wander_radius;
        let offset = vec3(self.rng.gen::<f32>(), 0.0, self.rng.gen::<f32>()) * radius;
        ctx.go_to(ctx.landmark(Landmark::Home) + offset, "wander point");
    }

    fn evade(&mut self, ctx: &MinionContext) {
        let behavior = &ctx.config.behavior;
        let direction = EvasionDirection::ALL[self.rng.gen_range(0..EvasionDirection::ALL.len())];
        let intensity = lerp_scalar(
            behavior.evade_intensity_min,
            behavior.evade_intensity_max,
            self.rng.gen::<f32>(),
        );
        log::trace!("agent {} evades {:?} at {:.2}", ctx.agent.id(), direction, intensity);
        ctx.agent.evade(direction, intensity);
    }
}

impl State<MinionStateId, MinionContext, MinionPayload> for DefensiveEvasion {
    fn id(&self) -> MinionStateId {
        MinionStateId::DefensiveEvasion
    }

    fn enter(&mut self, ctx: &MinionContext, _payload: Option<MinionPayload>) {
        announce(ctx, self.id());
        self.pause = None;
        self.wander(ctx);
        self.last_evade = ctx.now();
        self.evade_period =
            2.0 * ctx.agent.evade_cooldown_secs() + ctx.config.behavior.evade_period_padding;
    }

    fn update(&mut self, ctx: &MinionContext) -> Option<MinionTransition> {
        if ctx.agent.has_ball() {
            return Some(MinionTransition::to(MinionStateId::GoToThrowSpot));
        }
        if find_closest_available_ball(ctx.balls().iter(), &ctx.agent.position()).is_some() {
            return Some(MinionTransition::to(MinionStateId::CollectBall));
        }

        let now = ctx.now();
        if self.pause.is_none() && ctx.agent.reached_target() {
            let duration = self.rng.gen::<f32>() * ctx.config.behavior.max_pause_secs;
            self.pause = Some(Pause { start: now, duration });
        }

        if let Some(pause) = self.pause {
            ctx.agent.face_towards(ctx.landmark(Landmark::Confinement));
            if now - pause.start >= pause.duration {
                self.pause = None;
                self.wander(ctx);
            }
        } else if now - self.last_evade >= self.evade_period {
            self.last_evade = now;
            self.evade(ctx);
        }
        None
    }
}
