//! World Interface
//!
//! Everything the brain needs from the host game: the controlled agent, the
//! arena (match and team manager) and the simulation clock. The host owns
//! movement, navigation and physics; the brain only observes and commands
//! through these traits.
//!
//! Collaborators take `&self`; hosts keep mutable state behind `Cell` /
//! `RefCell` so the same handle can be shared by the brain and the match loop.

use std::cell::Cell;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Home,
    Away,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Home => Team::Away,
            Team::Away => Team::Home,
        }
    }
}

/// Team-relative reference points on the court.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Landmark {
    /// Team base, where agents spawn and rest
    Home,
    /// Forward point used to derive throw spots
    Advance,
    /// Left side entrance of the gutter leading to the confinement zone
    ConfinementEntryLeft,
    /// Far end of the left gutter
    ConfinementEndLeft,
    /// Inside the confinement zone
    Confinement,
    /// Far end of the right gutter (way out)
    ConfinementEndRight,
    /// Right side entrance of the gutter; also the lateral spread reference
    ConfinementEntryRight,
}

/// Ownership of a ball from the querying team's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BallState {
    Neutral,
    Team,
    Opponent,
    Held,
}

/// Snapshot of one ball. `index` is stable for the whole match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallInfo {
    pub index: usize,
    pub position: Vec3,
    /// Closest navigable point to the ball
    pub nav_position: Vec3,
    pub velocity: Vec3,
    pub is_held: bool,
    pub reachable: bool,
    pub state: BallState,
}

impl BallInfo {
    /// Free to pick up: not held, neutral and reachable
    pub fn is_available(&self) -> bool {
        !self.is_held && self.state == BallState::Neutral && self.reachable
    }
}

/// Snapshot of one opponent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpponentInfo {
    pub index: usize,
    pub position: Vec3,
    pub velocity: Vec3,
    pub forward: Vec3,
    pub is_confined: bool,
    /// Released from confinement but still walking out
    pub is_freed: bool,
}

impl OpponentInfo {
    pub fn is_valid_target(&self) -> bool {
        !self.is_confined && !self.is_freed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvasionDirection {
    Brake,
    Left,
    Right,
}

impl EvasionDirection {
    pub const ALL: [EvasionDirection; 3] =
        [EvasionDirection::Brake, EvasionDirection::Left, EvasionDirection::Right];
}

/// The agent being controlled.
pub trait Agent {
    fn id(&self) -> AgentId;
    /// Slot the agent spawned in, `0..team_size`
    fn spawn_index(&self) -> usize;
    fn team(&self) -> Team;

    fn position(&self) -> Vec3;
    fn forward(&self) -> Vec3;
    fn velocity(&self) -> Vec3;
    /// Launch point of a throw
    fn held_ball_position(&self) -> Vec3;
    /// Largest launch speed of a throw (m/s)
    fn throw_speed(&self) -> f32;
    fn evade_cooldown_secs(&self) -> f32;

    fn has_ball(&self) -> bool;
    fn is_confined(&self) -> bool;
    /// Confined and waiting for a teammate's throw
    fn can_be_rescued(&self) -> bool;
    /// Index of the ball this agent is currently after, if any
    fn tracked_ball(&self) -> Option<usize>;

    /// Start navigating; `false` when no path exists
    fn go_to(&self, target: Vec3) -> bool;
    fn face_towards(&self, target: Vec3);
    fn face_towards_for_throw(&self, target: Vec3);
    /// Release the ball; `false` when the throw could not happen this tick
    fn throw_ball(&self, direction: Vec3, normalized_speed: f32) -> bool;
    fn evade(&self, direction: EvasionDirection, intensity: f32);
    fn reached_target(&self) -> bool;

    /// Debug text sink
    fn display_text(&self, text: &str);
}

/// Match and team manager.
pub trait Arena {
    fn landmark(&self, team: Team, landmark: Landmark) -> Vec3;
    fn team_size(&self) -> usize;
    fn balls_per_team(&self) -> usize;
    fn total_balls(&self) -> usize;
    fn is_match_over(&self) -> bool;
    /// Acceleration acting on thrown balls
    fn gravity(&self) -> Vec3;

    /// Opponent `index` as seen by `team`
    fn opponent_info(&self, team: Team, index: usize) -> Option<OpponentInfo>;
    fn closest_non_confined_opponent(&self, position: Vec3, team: Team) -> Option<usize>;
    /// Full ball snapshot as seen by `team`. Expensive; read through
    /// [`crate::team::TeamCache::balls`].
    fn ball_infos(&self, team: Team) -> Vec<BallInfo>;
}

/// Simulation clock advanced by the match loop.
///
/// `tick` is the cache invalidation key; `elapsed_secs` drives timers.
#[derive(Debug, Default)]
pub struct SimClock {
    tick: Cell<u64>,
    elapsed: Cell<f32>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&self) -> u64 {
        self.tick.get()
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed.get()
    }

    /// Start the next tick, `dt` seconds after the previous one
    pub fn advance(&self, dt: f32) {
        self.tick.set(self.tick.get() + 1);
        self.elapsed.set(self.elapsed.get() + dt.max(0.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec3;

    #[test]
    fn test_clock_advance() {
        let clock = SimClock::new();
        assert_eq!(clock.tick(), 0);

        clock.advance(0.25);
        clock.advance(0.25);
        assert_eq!(clock.tick(), 2);
        assert!((clock.elapsed_secs() - 0.5).abs() < f32::EPSILON);

        // negative steps never rewind time
        clock.advance(-1.0);
        assert_eq!(clock.tick(), 3);
        assert!((clock.elapsed_secs() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_ball_availability() {
        let mut ball = BallInfo {
            index: 0,
            position: vec3(1.0, 0.0, 1.0),
            nav_position: vec3(1.0, 0.0, 1.0),
            velocity: Vec3::zeros(),
            is_held: false,
            reachable: true,
            state: BallState::Neutral,
        };
        assert!(ball.is_available());

        ball.state = BallState::Team;
        assert!(!ball.is_available());

        ball.state = BallState::Neutral;
        ball.reachable = false;
        assert!(!ball.is_available());
    }

    #[test]
    fn test_team_opponent() {
        assert_eq!(Team::Home.opponent(), Team::Away);
        assert_eq!(Team::Away.opponent().opponent(), Team::Away);
    }
}
