//! Shot Selection
//!
//! Per-tick policy on top of the intercept solver: throw now, keep aiming, or
//! give up on the shot. Nothing is locked in across ticks; the caller re-runs
//! selection every tick while it holds a ball.

use serde::{Deserialize, Serialize};

use crate::ballistics::{solve_intercept, InterceptQuery};
use crate::config::BrainConfig;
use crate::math::{horizontal_angle_deg, Vec3};
use crate::world::{Agent, Arena, OpponentInfo, Team};

/// A committed throw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotPlan {
    /// Unit launch direction
    pub direction: Vec3,
    /// Launch speed (m/s)
    pub speed: f32,
    /// `speed` relative to the agent's throw speed, at most 1
    pub normalized_speed: f32,
    pub intercept_t: f32,
    /// Where the target will be at `intercept_t`
    pub intercept_pos: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotDecision {
    /// Solution found and the agent faces the launch direction
    Throw(ShotPlan),
    /// Solution found, agent still turning toward it
    Aim { intercept_pos: Vec3 },
    /// No viable shot at the current target
    TargetingFailed,
}

/// Solve a throw from the agent's hand at a target moving at constant
/// velocity. `None` when the solver finds no launch.
pub fn plan_throw(
    agent: &dyn Agent,
    target_pos: Vec3,
    target_velocity: Vec3,
    target_forward: Vec3,
    gravity: Vec3,
    config: &BrainConfig,
) -> Option<ShotPlan> {
    let max_speed = agent.throw_speed();
    let query = InterceptQuery {
        launch_pos: agent.held_ball_position(),
        max_speed,
        acceleration: gravity,
        target_pos,
        target_velocity,
        target_forward,
        max_allowed_error: config.shot.max_allowed_error,
    };

    let solution = solve_intercept(&query, &config.solver)?;
    Some(ShotPlan {
        direction: solution.direction,
        speed: solution.speed,
        normalized_speed: (solution.speed / max_speed).min(1.0),
        intercept_t: solution.intercept_t,
        intercept_pos: query.target_position_at(solution.intercept_t),
    })
}

/// Classify the shot at `target` for this tick.
pub fn select_throw(
    agent: &dyn Agent,
    target: &OpponentInfo,
    gravity: Vec3,
    config: &BrainConfig,
) -> ShotDecision {
    let Some(plan) = plan_throw(agent, target.position, target.velocity, target.forward, gravity, config)
    else {
        return ShotDecision::TargetingFailed;
    };

    // a launch with no ground-plane component needs no turning
    let aligned = horizontal_angle_deg(&agent.forward(), &plan.direction)
        .map_or(true, |angle| angle <= config.shot.release_angle_deg);

    if aligned {
        ShotDecision::Throw(plan)
    } else {
        ShotDecision::Aim { intercept_pos: plan.intercept_pos }
    }
}

/// Keep the tracked opponent while it is a valid target, otherwise switch to
/// the closest opponent not in confinement.
pub fn resolve_opponent(
    arena: &dyn Arena,
    team: Team,
    from: Vec3,
    tracked: Option<usize>,
) -> Option<OpponentInfo> {
    if let Some(info) = tracked.and_then(|index| arena.opponent_info(team, index)) {
        if info.is_valid_target() {
            return Some(info);
        }
    }

    let index = arena.closest_non_confined_opponent(from, team)?;
    arena.opponent_info(team, index)
}
