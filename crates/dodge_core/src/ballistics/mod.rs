//! Ballistic Intercept Solver
//!
//! Computes a launch direction and speed that lets a projectile meet a target
//! moving at constant velocity, optionally under constant acceleration
//! (gravity).
//!
//! ## Paths
//! ```text
//! |a| ~ 0  → closed form: |D + V·t| = s·t, quadratic in t
//! |a| > 0  → bounded fixed-point refinement of the flight time
//! ```
//!
//! The solver refuses targets beyond the engagement distance and targets that
//! are running away fast enough that a chase is hopeless. Refusals and
//! unreachable targets are reported as `None`; they are a normal outcome.

mod iterative;
mod linear;

use serde::{Deserialize, Serialize};

use crate::config::SolverConfig;
use crate::math::{normalize_or_zero, Vec3};

/// Inputs for one intercept solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterceptQuery {
    /// Projectile launch position
    pub launch_pos: Vec3,
    /// Largest launch speed available (m/s)
    pub max_speed: f32,
    /// Constant acceleration acting on the projectile (usually gravity)
    pub acceleration: Vec3,
    /// Target position at t = 0
    pub target_pos: Vec3,
    /// Constant target velocity
    pub target_velocity: Vec3,
    /// Target facing; only a cue when the velocity is ~zero
    pub target_forward: Vec3,
    /// Caller's bound on projectile/target separation at the intercept time
    pub max_allowed_error: f32,
}

/// A launch solution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterceptSolution {
    /// Unit launch direction
    pub direction: Vec3,
    /// Launch speed, never above the query's `max_speed`
    pub speed: f32,
    /// Flight time until the projectile meets the target
    pub intercept_t: f32,
    /// Alternate intercept time (other quadratic root when one exists).
    /// Does not correspond to `direction`/`speed`.
    pub alt_t: f32,
}

impl InterceptSolution {
    /// Launch velocity vector
    pub fn velocity(&self) -> Vec3 {
        self.direction * self.speed
    }

    /// Projectile position `t` seconds after launch under `acceleration`
    pub fn projectile_position(&self, launch_pos: &Vec3, acceleration: &Vec3, t: f32) -> Vec3 {
        launch_pos + self.velocity() * t + acceleration * (0.5 * t * t)
    }
}

impl InterceptQuery {
    /// Target position `t` seconds from now
    pub fn target_position_at(&self, t: f32) -> Vec3 {
        self.target_pos + self.target_velocity * t
    }

    fn distance(&self) -> f32 {
        (self.target_pos - self.launch_pos).norm()
    }

    /// Target moving fast, directly away from the launcher, and already far.
    fn is_escaping(&self, cfg: &SolverConfig) -> bool {
        let speed = self.target_velocity.norm();
        if speed <= cfg.escape_speed {
            return false;
        }
        let away = normalize_or_zero(&(self.target_pos - self.launch_pos));
        let heading = normalize_or_zero(&self.target_velocity);
        away.dot(&heading) > cfg.escape_dot && self.distance() > cfg.escape_distance
    }
}

/// Solve for a launch that intercepts the target.
///
/// Returns `None` when the target is out of range, escaping, or not reachable
/// at the available launch speed.
pub fn solve_intercept(query: &InterceptQuery, cfg: &SolverConfig) -> Option<InterceptSolution> {
    if query.max_speed <= 0.0 || query.max_speed.is_nan() {
        return None;
    }

    let distance = query.distance();
    if distance > cfg.max_target_distance {
        log::trace!("intercept refused: target at {:.1}m beyond engagement range", distance);
        return None;
    }

    if query.is_escaping(cfg) {
        log::trace!("intercept refused: target escaping at {:.1}m", distance);
        return None;
    }

    if query.acceleration.norm() < cfg.zero_accel_epsilon {
        linear::solve(query)
    } else {
        iterative::solve(query, cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec3;

    pub(super) fn query(target_pos: Vec3, target_velocity: Vec3, acceleration: Vec3) -> InterceptQuery {
        InterceptQuery {
            launch_pos: vec3(0.0, 1.0, 0.0),
            max_speed: 20.0,
            acceleration,
            target_pos,
            target_velocity,
            target_forward: vec3(0.0, 0.0, 1.0),
            max_allowed_error: 0.75,
        }
    }

    #[test]
    fn test_out_of_range_target_is_refused() {
        let cfg = SolverConfig::default();
        let q = query(vec3(45.0, 1.0, 0.0), Vec3::zeros(), Vec3::zeros());
        assert!(solve_intercept(&q, &cfg).is_none());

        let q = query(vec3(45.0, 1.0, 0.0), Vec3::zeros(), vec3(0.0, -9.81, 0.0));
        assert!(solve_intercept(&q, &cfg).is_none());
    }

    #[test]
    fn test_escaping_target_is_refused() {
        let cfg = SolverConfig::default();
        // 35m away, running straight away at 8 m/s
        let q = query(vec3(35.0, 1.0, 0.0), vec3(8.0, 0.0, 0.0), Vec3::zeros());
        assert!(solve_intercept(&q, &cfg).is_none());
    }

    #[test]
    fn test_fast_target_inside_escape_distance_is_engaged() {
        let cfg = SolverConfig::default();
        // same speed and heading, but only 20m away: not considered escaping
        let q = query(vec3(20.0, 1.0, 0.0), vec3(8.0, 0.0, 0.0), Vec3::zeros());
        assert!(solve_intercept(&q, &cfg).is_some());
    }

    #[test]
    fn test_fast_crossing_target_is_not_escaping() {
        let cfg = SolverConfig::default();
        // far and fast, but moving sideways
        let q = query(vec3(35.0, 1.0, 0.0), vec3(0.0, 0.0, 8.0), Vec3::zeros());
        assert!(!q.is_escaping(&cfg));
    }

    #[test]
    fn test_zero_speed_launcher_has_no_solution() {
        let cfg = SolverConfig::default();
        let mut q = query(vec3(5.0, 1.0, 0.0), Vec3::zeros(), Vec3::zeros());
        q.max_speed = 0.0;
        assert!(solve_intercept(&q, &cfg).is_none());
    }

    #[test]
    fn test_dispatch_uses_gravity_path() {
        let cfg = SolverConfig::default();
        let gravity = vec3(0.0, -9.81, 0.0);
        let q = query(vec3(10.0, 1.0, 0.0), Vec3::zeros(), gravity);
        let sol = solve_intercept(&q, &cfg).unwrap();

        // a gravity shot must aim above the target
        assert!(sol.direction.y > 0.0);
        let hit = sol.projectile_position(&q.launch_pos, &gravity, sol.intercept_t);
        assert!((hit - q.target_pos).norm() < q.max_allowed_error);
    }
}
