//! Ballistic solver tuning

use serde::{Deserialize, Serialize};

/// Tuning constants for [`crate::ballistics::solve_intercept`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Targets further than this (m) are never engaged
    pub max_target_distance: f32,
    /// Longest flight time (s) a solution may have
    pub max_intercept_time: f32,

    /// Escape refusal: target speed above this (m/s)...
    pub escape_speed: f32,
    /// ...moving away with a direction dot above this...
    pub escape_dot: f32,
    /// ...and further than this (m) is not chased
    pub escape_distance: f32,

    /// Below this acceleration magnitude the closed-form path is used
    pub zero_accel_epsilon: f32,

    /// Fixed-point iteration budget for the acceleration path
    pub max_iterations: u32,
    /// Allowed miss distance (m) for a zero-time shot; interpolated toward
    /// the caller's bound as the flight time approaches `max_intercept_time`
    pub near_field_error: f32,
    /// Floor for the initial time guess (s)
    pub min_time_guess: f32,
    /// Time guess multiplier when the required speed is over the limit
    pub speed_inflation: f32,
    /// Horizontal launch speed below which the re-seed is skipped (m/s)
    pub horizontal_speed_epsilon: f32,
    /// Time increment (s) used instead of the re-seed on a stall
    pub stall_nudge: f32,
    /// Blend factor toward the horizontal time estimate
    pub reseed_blend: f32,
    /// Scale applied to the launch speed of an accepted iterative solution
    pub holdback_factor: f32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_target_distance: 40.0,
            max_intercept_time: 5.0,
            escape_speed: 7.0,
            escape_dot: 0.9,
            escape_distance: 30.0,
            zero_accel_epsilon: f32::EPSILON,
            max_iterations: 10,
            near_field_error: 0.8,
            min_time_guess: 0.01,
            speed_inflation: 1.1,
            horizontal_speed_epsilon: 0.01,
            stall_nudge: 0.05,
            reseed_blend: 0.5,
            holdback_factor: 1.0,
        }
    }
}

impl SolverConfig {
    /// Shorter engagement envelope, only takes close shots
    pub fn cautious() -> Self {
        Self {
            max_target_distance: 30.0,
            max_intercept_time: 3.0,
            escape_distance: 20.0,
            ..Self::default()
        }
    }

    /// Longer engagement envelope and more solver iterations
    pub fn aggressive() -> Self {
        Self {
            max_target_distance: 50.0,
            max_intercept_time: 6.0,
            escape_speed: 9.0,
            escape_distance: 40.0,
            max_iterations: 16,
            ..Self::default()
        }
    }
}
