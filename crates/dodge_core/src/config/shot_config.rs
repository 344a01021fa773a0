use serde::{Deserialize, Serialize};

/// Miss tolerance used by the minion's throws: ball radius plus minion radius,
/// shaved by 1% so the ball still overlaps the target.
pub const DEFAULT_MAX_ALLOWED_ERROR: f32 = (0.25 + 0.5) * 0.99;

/// Shot selection policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotConfig {
    /// Largest acceptable miss distance (m) passed to the solver
    pub max_allowed_error: f32,
    /// Facing must be within this many degrees of the launch direction
    /// (ground plane) before the ball is released
    pub release_angle_deg: f32,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self { max_allowed_error: DEFAULT_MAX_ALLOWED_ERROR, release_angle_deg: 15.0 }
    }
}

impl ShotConfig {
    pub fn cautious() -> Self {
        Self { max_allowed_error: 0.5, release_angle_deg: 8.0 }
    }

    pub fn aggressive() -> Self {
        Self { max_allowed_error: 1.0, release_angle_deg: 25.0 }
    }
}
