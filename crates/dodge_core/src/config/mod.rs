//! # Brain Configuration
//!
//! All tuning constants used by the solver, shot selection and minion
//! behaviours live here instead of being scattered as magic numbers.
//!
//! ## Usage
//! ```rust
//! use dodge_core::config::BrainConfig;
//!
//! let config = BrainConfig::default();
//! let cautious = BrainConfig::cautious();
//! assert!(cautious.solver.max_target_distance < config.solver.max_target_distance);
//! ```
//!
//! ## Environment Variables
//!
//! - `DODGE_PROFILE`: Select preset (cautious, aggressive, default)

mod behavior_config;
mod shot_config;
mod solver_config;

pub use behavior_config::BehaviorConfig;
pub use shot_config::{ShotConfig, DEFAULT_MAX_ALLOWED_ERROR};
pub use solver_config::SolverConfig;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;

/// Complete tuning set for one minion brain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BrainConfig {
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub shot: ShotConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
}

impl BrainConfig {
    /// Close shots only, tight tolerance
    pub fn cautious() -> Self {
        Self {
            solver: SolverConfig::cautious(),
            shot: ShotConfig::cautious(),
            behavior: BehaviorConfig::default(),
        }
    }

    /// Long shots, loose tolerance
    pub fn aggressive() -> Self {
        Self {
            solver: SolverConfig::aggressive(),
            shot: ShotConfig::aggressive(),
            behavior: BehaviorConfig::default(),
        }
    }

    /// Preset by name; unknown names fall back to the default preset
    pub fn from_profile(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "cautious" => Self::cautious(),
            "aggressive" => Self::aggressive(),
            _ => Self::default(),
        }
    }

    /// Load from environment variable DODGE_PROFILE or use default
    pub fn from_env_or_default() -> Self {
        Self::from_profile(&env::var("DODGE_PROFILE").unwrap_or_default())
    }

    /// Parse and validate a JSON document; missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would make the solver or behaviours degenerate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.solver;
        positive("solver.max_target_distance", s.max_target_distance)?;
        positive("solver.max_intercept_time", s.max_intercept_time)?;
        positive("solver.min_time_guess", s.min_time_guess)?;
        positive("solver.stall_nudge", s.stall_nudge)?;
        if s.max_iterations == 0 {
            return Err(invalid("solver.max_iterations", "must be at least 1"));
        }
        if s.speed_inflation <= 1.0 {
            return Err(invalid("solver.speed_inflation", "must be greater than 1"));
        }
        if !(0.0..=1.0).contains(&s.reseed_blend) {
            return Err(invalid("solver.reseed_blend", "must be within [0, 1]"));
        }
        if !(s.holdback_factor > 0.0 && s.holdback_factor <= 1.0) {
            return Err(invalid("solver.holdback_factor", "must be within (0, 1]"));
        }
        if s.near_field_error < 0.0 {
            return Err(invalid("solver.near_field_error", "must not be negative"));
        }

        positive("shot.max_allowed_error", self.shot.max_allowed_error)?;
        if !(0.0..=180.0).contains(&self.shot.release_angle_deg) {
            return Err(invalid("shot.release_angle_deg", "must be within [0, 180]"));
        }

        let b = &self.behavior;
        if !(b.ball_switch_ratio > 0.0 && b.ball_switch_ratio <= 1.0) {
            return Err(invalid("behavior.ball_switch_ratio", "must be within (0, 1]"));
        }
        if b.evade_intensity_min > b.evade_intensity_max {
            return Err(invalid("behavior.evade_intensity_min", "exceeds evade_intensity_max"));
        }
        if b.max_pause_secs < 0.0 {
            return Err(invalid("behavior.max_pause_secs", "must not be negative"));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, &format!("must be positive, got {}", value)))
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.to_string() }
}

// ========== Tests ==========
