//! Minion behaviour tuning
//!
//! Team-size dependent switches, approach ratios and the defensive wander.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Seconds after match start during which teammates may chase the same ball
    pub early_game_secs: f32,
    /// Team size from which the "large team" rules apply
    pub large_team_size: usize,
    /// Team size from which a closer ball may replace the tracked one
    pub switch_team_size: usize,
    /// Claim check throttle (s) for large teams
    pub claim_check_interval_large: f32,
    /// Claim check throttle (s) for small teams
    pub claim_check_interval_small: f32,
    /// A candidate ball must be closer than this fraction of the tracked
    /// ball's distance to trigger a switch
    pub ball_switch_ratio: f32,
    /// Spawn slots below this may go for opponent-side balls (large teams)
    pub aggressive_spawn_slots: usize,

    /// Home→advance interpolation of the throw spot
    pub advance_ratio: f32,
    /// Large teams: ratio while holding a ball
    pub advance_ratio_with_ball: f32,
    /// Large teams: ratio without a ball
    pub advance_ratio_without_ball: f32,
    /// Lateral spread (m) across the court for large teams
    pub spread_width: f32,

    /// Radius (m) of the defensive wander box
    pub wander_radius: f32,
    /// Longest pause (s) after reaching a wander point
    pub max_pause_secs: f32,
    pub evade_intensity_min: f32,
    pub evade_intensity_max: f32,
    /// Added to twice the evade cooldown to get the evade period (s)
    pub evade_period_padding: f32,

    /// Base seed for the per-agent RNG (mixed with the agent id)
    pub rng_seed: u64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            early_game_secs: 5.0,
            large_team_size: 4,
            switch_team_size: 3,
            claim_check_interval_large: 0.5,
            claim_check_interval_small: 0.1,
            ball_switch_ratio: 0.8,
            aggressive_spawn_slots: 2,
            advance_ratio: 0.5,
            advance_ratio_with_ball: 0.6,
            advance_ratio_without_ball: 0.3,
            spread_width: 2.5,
            wander_radius: 6.0,
            max_pause_secs: 3.0,
            evade_intensity_min: 0.6,
            evade_intensity_max: 1.0,
            evade_period_padding: 0.1,
            rng_seed: 0x5eed_d0d6,
        }
    }
}

impl BehaviorConfig {
    /// Whether the large-team rules apply for this roster size
    pub fn is_large_team(&self, team_size: usize) -> bool {
        team_size >= self.large_team_size
    }

    /// Claim check throttle for this roster size
    pub fn claim_check_interval(&self, team_size: usize) -> f32 {
        if self.is_large_team(team_size) {
            self.claim_check_interval_large
        } else {
            self.claim_check_interval_small
        }
    }
}
