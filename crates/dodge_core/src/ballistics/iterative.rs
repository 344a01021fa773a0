//! Intercept under constant acceleration.
//!
//! Fixed-point refinement of the flight time `t`. For a guess `t` the launch
//! velocity that reaches the predicted target point is
//! `v = (P(t) − L − ½·a·t²) / t`; the guess is then pulled toward the
//! horizontal distance over horizontal speed. The loop is bounded by
//! `SolverConfig::max_iterations`.

use super::{InterceptQuery, InterceptSolution};
use crate::config::SolverConfig;
use crate::math::{horizontal, lerp_scalar, normalize_or_zero};

#[derive(Debug, Clone, Copy)]
struct Candidate {
    solution: InterceptSolution,
    error: f32,
}

/// Allowed miss distance for a flight time: tight near the launcher, the
/// caller's bound at `max_intercept_time` and beyond.
fn allowed_error(t: f32, max_allowed_error: f32, cfg: &SolverConfig) -> f32 {
    let weight = (t / cfg.max_intercept_time).clamp(0.0, 1.0);
    lerp_scalar(cfg.near_field_error, max_allowed_error, weight)
}

pub(super) fn solve(query: &InterceptQuery, cfg: &SolverConfig) -> Option<InterceptSolution> {
    let g = query.acceleration;
    let seed = (query.target_pos - query.launch_pos).norm() / query.max_speed;
    let mut t = seed.max(cfg.min_time_guess);
    let mut best: Option<Candidate> = None;

    for iteration in 0..cfg.max_iterations {
        let predicted = query.target_position_at(t);
        let to_target = predicted - query.launch_pos;

        let required = (to_target - g * (0.5 * t * t)) / t;
        let speed = required.norm();
        if speed > query.max_speed {
            // more flight time lowers the required speed
            t *= cfg.speed_inflation;
            continue;
        }

        let projectile_hit = query.launch_pos + required * t + g * (0.5 * t * t);
        let error = (projectile_hit - predicted).norm();
        let direction = normalize_or_zero(&required);

        if error < allowed_error(t, query.max_allowed_error, cfg) {
            log::trace!("intercept converged after {} iterations (t={:.3})", iteration + 1, t);
            return Some(InterceptSolution {
                direction,
                speed: (speed * cfg.holdback_factor).min(query.max_speed),
                intercept_t: t,
                alt_t: t,
            });
        }

        if best.map_or(true, |b| error < b.error) {
            best = Some(Candidate {
                solution: InterceptSolution { direction, speed, intercept_t: t, alt_t: t },
                error,
            });
        }

        let horizontal_dist = horizontal(&to_target).norm();
        let horizontal_speed = horizontal(&required).norm();
        if horizontal_speed > cfg.horizontal_speed_epsilon {
            t = lerp_scalar(t, horizontal_dist / horizontal_speed, cfg.reseed_blend);
        } else {
            t += cfg.stall_nudge;
        }
    }

    // best effort: the residual may exceed the tolerance, the time may not
    best.filter(|c| c.solution.intercept_t <= cfg.max_intercept_time).map(|c| c.solution)
}
