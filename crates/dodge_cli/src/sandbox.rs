//! Kinematic sandbox court
//!
//! Just enough world to drive the brains end to end: agents walk straight at
//! a fixed speed, balls are picked up on contact, and a throw is traced along
//! its ballistic arc until it hits someone or lands.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dodge_core::math::{horizontal, normalize_or_zero, vec3};
use dodge_core::{
    Agent, AgentId, Arena, BallInfo, BallState, EvasionDirection, Landmark, OpponentInfo, Team,
    Vec3,
};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

const WALK_SPEED: f32 = 5.0;
const ARRIVE_RADIUS: f32 = 0.3;
const PICKUP_RADIUS: f32 = 0.8;
const HIT_RADIUS: f32 = 0.75;
const RESCUE_RADIUS: f32 = 1.5;
const THROW_SPEED: f32 = 20.0;
const EVADE_STEP: f32 = 0.5;
const FLIGHT_STEP: f32 = 0.02;
const MAX_FLIGHT_SECS: f32 = 4.0;
const COURT_HALF_WIDTH: f32 = 12.0;
const COURT_HALF_LENGTH: f32 = 20.0;

/// Height of an agent's body centre above its feet
const BODY_HEIGHT: f32 = 1.0;

pub struct SandboxAgent {
    id: u32,
    spawn_index: usize,
    team: Team,
    position: Cell<Vec3>,
    velocity: Cell<Vec3>,
    forward: Cell<Vec3>,
    goal: Cell<Option<Vec3>>,
    has_ball: Cell<bool>,
    confined: Cell<bool>,
    at_confinement: Cell<bool>,
    tracked: Cell<Option<usize>>,
    pending_throw: Cell<Option<Vec3>>,
}

impl SandboxAgent {
    fn new(id: u32, spawn_index: usize, team: Team, position: Vec3) -> Self {
        let forward = match team {
            Team::Home => vec3(0.0, 0.0, 1.0),
            Team::Away => vec3(0.0, 0.0, -1.0),
        };
        Self {
            id,
            spawn_index,
            team,
            position: Cell::new(position),
            velocity: Cell::new(Vec3::zeros()),
            forward: Cell::new(forward),
            goal: Cell::new(None),
            has_ball: Cell::new(false),
            confined: Cell::new(false),
            at_confinement: Cell::new(false),
            tracked: Cell::new(None),
            pending_throw: Cell::new(None),
        }
    }

    fn face(&self, target: Vec3) {
        let dir = normalize_or_zero(&horizontal(&(target - self.position.get())));
        if dir != Vec3::zeros() {
            self.forward.set(dir);
        }
    }

    fn step(&self, dt: f32) {
        let Some(goal) = self.goal.get() else {
            self.velocity.set(Vec3::zeros());
            return;
        };
        let here = self.position.get();
        let to_goal = horizontal(&(goal - here));
        let remaining = to_goal.norm();
        let travel = (WALK_SPEED * dt).min(remaining);
        let step = normalize_or_zero(&to_goal) * travel;
        self.position.set(here + step);
        self.velocity.set(if dt > 0.0 { step / dt } else { Vec3::zeros() });
    }
}

impl Agent for SandboxAgent {
    fn id(&self) -> AgentId {
        AgentId(self.id)
    }
    fn spawn_index(&self) -> usize {
        self.spawn_index
    }
    fn team(&self) -> Team {
        self.team
    }
    fn position(&self) -> Vec3 {
        self.position.get()
    }
    fn forward(&self) -> Vec3 {
        self.forward.get()
    }
    fn velocity(&self) -> Vec3 {
        self.velocity.get()
    }
    fn held_ball_position(&self) -> Vec3 {
        self.position.get() + vec3(0.0, BODY_HEIGHT, 0.0) + self.forward.get() * 0.4
    }
    fn throw_speed(&self) -> f32 {
        THROW_SPEED
    }
    fn evade_cooldown_secs(&self) -> f32 {
        1.0
    }
    fn has_ball(&self) -> bool {
        self.has_ball.get()
    }
    fn is_confined(&self) -> bool {
        self.confined.get()
    }
    fn can_be_rescued(&self) -> bool {
        self.confined.get() && self.at_confinement.get()
    }
    fn tracked_ball(&self) -> Option<usize> {
        self.tracked.get()
    }
    fn go_to(&self, target: Vec3) -> bool {
        self.goal.set(Some(target));
        true
    }
    fn face_towards(&self, target: Vec3) {
        self.face(target);
    }
    fn face_towards_for_throw(&self, target: Vec3) {
        self.face(target);
    }
    fn throw_ball(&self, direction: Vec3, normalized_speed: f32) -> bool {
        if !self.has_ball.get() {
            return false;
        }
        self.pending_throw.set(Some(direction * normalized_speed.clamp(0.0, 1.0) * THROW_SPEED));
        true
    }
    fn evade(&self, direction: EvasionDirection, intensity: f32) {
        let right = vec3(self.forward.get().z, 0.0, -self.forward.get().x);
        match direction {
            EvasionDirection::Brake => self.goal.set(None),
            EvasionDirection::Left => self.position.set(self.position.get() - right * EVADE_STEP * intensity),
            EvasionDirection::Right => self.position.set(self.position.get() + right * EVADE_STEP * intensity),
        }
    }
    fn reached_target(&self) -> bool {
        match self.goal.get() {
            Some(goal) => horizontal(&(goal - self.position.get())).norm() <= ARRIVE_RADIUS,
            None => true,
        }
    }
    fn display_text(&self, text: &str) {
        log::trace!("agent #{}: {}", self.id, text);
    }
}

#[derive(Debug, Clone, Copy)]
struct SandboxBall {
    position: Vec3,
    holder: Option<u32>,
}

/// What happened to a thrown ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThrowOutcome {
    Hit { thrower: u32, target: u32 },
    Rescued { thrower: u32, teammate: u32 },
    Landed { thrower: u32 },
}

pub struct Court {
    team_size: usize,
    balls_per_team: usize,
    agents: Vec<Rc<SandboxAgent>>,
    balls: RefCell<Vec<SandboxBall>>,
    match_over: Cell<bool>,
}

impl Court {
    /// Two full teams at their home lines, balls scattered on the centre line
    pub fn new(team_size: usize, balls_per_team: usize, rng: &mut ChaCha8Rng) -> Self {
        let mut agents = Vec::with_capacity(team_size * 2);
        for (offset, team) in [Team::Home, Team::Away].into_iter().enumerate() {
            let home = landmark_position(team, Landmark::Home);
            for slot in 0..team_size {
                let x = (slot as f32 - (team_size as f32 - 1.0) / 2.0) * 2.0;
                let id = (offset * team_size + slot) as u32;
                agents.push(Rc::new(SandboxAgent::new(id, slot, team, home + vec3(x, 0.0, 0.0))));
            }
        }

        let balls = (0..balls_per_team * 2)
            .map(|_| SandboxBall {
                position: vec3(rng.gen_range(-8.0..8.0), 0.0, rng.gen_range(-1.0..1.0)),
                holder: None,
            })
            .collect();

        Self {
            team_size,
            balls_per_team,
            agents,
            balls: RefCell::new(balls),
            match_over: Cell::new(false),
        }
    }

    pub fn agents(&self) -> &[Rc<SandboxAgent>] {
        &self.agents
    }

    fn roster(&self, team: Team) -> impl Iterator<Item = &Rc<SandboxAgent>> {
        self.agents.iter().filter(move |a| a.team == team)
    }

    fn find(&self, id: u32) -> Option<&Rc<SandboxAgent>> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn confined_count(&self, team: Team) -> usize {
        self.roster(team).filter(|a| a.confined.get()).count()
    }

    /// Move agents, resolve throws and pickups, then check for a winner
    pub fn step(&self, dt: f32) -> Vec<ThrowOutcome> {
        for agent in &self.agents {
            agent.step(dt);
            let confinement = landmark_position(agent.team, Landmark::Confinement);
            agent
                .at_confinement
                .set(horizontal(&(confinement - agent.position.get())).norm() <= RESCUE_RADIUS);
        }

        let outcomes: Vec<ThrowOutcome> =
            self.agents.iter().filter_map(|agent| self.resolve_throw(agent)).collect();

        self.pick_up_balls();
        self.update_tracking();

        for team in [Team::Home, Team::Away] {
            if !self.match_over.get() && self.confined_count(team) == self.team_size {
                log::info!("every {:?} agent is confined, match over", team);
                self.match_over.set(true);
            }
        }
        outcomes
    }

    fn resolve_throw(&self, thrower: &SandboxAgent) -> Option<ThrowOutcome> {
        let velocity = thrower.pending_throw.take()?;
        let launch = thrower.held_ball_position();
        let gravity = self.gravity();
        thrower.has_ball.set(false);

        let mut t = 0.0;
        let mut ball = launch;
        let mut outcome = ThrowOutcome::Landed { thrower: thrower.id };
        while t < MAX_FLIGHT_SECS {
            t += FLIGHT_STEP;
            ball = launch + velocity * t + gravity * (0.5 * t * t);
            if ball.y <= 0.0 {
                break;
            }
            let hit = self.agents.iter().filter(|a| a.id != thrower.id).find(|a| {
                let body = a.position.get() + a.velocity.get() * t + vec3(0.0, BODY_HEIGHT, 0.0);
                (ball - body).norm() <= HIT_RADIUS
            });
            if let Some(target) = hit {
                outcome = self.apply_hit(thrower, target);
                break;
            }
        }

        let landing = vec3(
            ball.x.clamp(-COURT_HALF_WIDTH, COURT_HALF_WIDTH),
            0.0,
            ball.z.clamp(-COURT_HALF_LENGTH, COURT_HALF_LENGTH),
        );
        let mut balls = self.balls.borrow_mut();
        if let Some(held) = balls.iter_mut().find(|b| b.holder == Some(thrower.id)) {
            held.holder = None;
            held.position = landing;
        }
        Some(outcome)
    }

    fn apply_hit(&self, thrower: &SandboxAgent, target: &SandboxAgent) -> ThrowOutcome {
        if target.team != thrower.team && !target.confined.get() {
            target.confined.set(true);
            self.drop_ball(target);
            return ThrowOutcome::Hit { thrower: thrower.id, target: target.id };
        }
        if target.team == thrower.team && target.confined.get() {
            target.confined.set(false);
            return ThrowOutcome::Rescued { thrower: thrower.id, teammate: target.id };
        }
        ThrowOutcome::Landed { thrower: thrower.id }
    }

    fn drop_ball(&self, agent: &SandboxAgent) {
        if !agent.has_ball.replace(false) {
            return;
        }
        let mut balls = self.balls.borrow_mut();
        if let Some(held) = balls.iter_mut().find(|b| b.holder == Some(agent.id)) {
            held.holder = None;
            held.position = agent.position.get();
        }
    }

    fn pick_up_balls(&self) {
        let mut balls = self.balls.borrow_mut();
        for agent in self.agents.iter().filter(|a| !a.has_ball.get() && !a.confined.get()) {
            let here = agent.position.get();
            if let Some(ball) = balls
                .iter_mut()
                .find(|b| b.holder.is_none() && horizontal(&(b.position - here)).norm() <= PICKUP_RADIUS)
            {
                ball.holder = Some(agent.id);
                agent.has_ball.set(true);
                log::debug!("agent #{} picked up a ball", agent.id);
            }
        }
        for ball in balls.iter_mut() {
            if let Some(holder) = ball.holder.and_then(|id| self.find(id)) {
                ball.position = holder.held_ball_position();
            }
        }
    }

    fn update_tracking(&self) {
        let balls = self.balls.borrow();
        for agent in &self.agents {
            let tracked = agent.goal.get().and_then(|goal| {
                balls
                    .iter()
                    .position(|b| b.holder.is_none() && horizontal(&(b.position - goal)).norm() < 0.01)
            });
            agent.tracked.set(tracked);
        }
    }

    fn opponents_of(&self, team: Team) -> Vec<&Rc<SandboxAgent>> {
        self.roster(team.opponent()).collect()
    }
}

impl Arena for Court {
    fn landmark(&self, team: Team, landmark: Landmark) -> Vec3 {
        landmark_position(team, landmark)
    }
    fn team_size(&self) -> usize {
        self.team_size
    }
    fn balls_per_team(&self) -> usize {
        self.balls_per_team
    }
    fn total_balls(&self) -> usize {
        self.balls_per_team * 2
    }
    fn is_match_over(&self) -> bool {
        self.match_over.get()
    }
    fn gravity(&self) -> Vec3 {
        vec3(0.0, -9.81, 0.0)
    }
    fn opponent_info(&self, team: Team, index: usize) -> Option<OpponentInfo> {
        let agent = self.opponents_of(team).into_iter().nth(index)?;
        Some(OpponentInfo {
            index,
            position: agent.position.get(),
            velocity: agent.velocity.get(),
            forward: agent.forward.get(),
            is_confined: agent.confined.get(),
            is_freed: false,
        })
    }
    fn closest_non_confined_opponent(&self, position: Vec3, team: Team) -> Option<usize> {
        self.opponents_of(team)
            .into_iter()
            .enumerate()
            .filter(|(_, a)| !a.confined.get())
            .min_by(|(_, a), (_, b)| {
                let da = (a.position.get() - position).norm();
                let db = (b.position.get() - position).norm();
                da.total_cmp(&db)
            })
            .map(|(index, _)| index)
    }
    fn ball_infos(&self, _team: Team) -> Vec<BallInfo> {
        self.balls
            .borrow()
            .iter()
            .enumerate()
            .map(|(index, ball)| {
                let held = ball.holder.is_some();
                BallInfo {
                    index,
                    position: ball.position,
                    nav_position: vec3(ball.position.x, 0.0, ball.position.z),
                    velocity: Vec3::zeros(),
                    is_held: held,
                    reachable: true,
                    state: if held { BallState::Held } else { BallState::Neutral },
                }
            })
            .collect()
    }
}

/// Court along Z with the Home team at negative Z. Each team's confinement
/// zone sits behind the opposing team.
pub fn landmark_position(team: Team, landmark: Landmark) -> Vec3 {
    let p = match landmark {
        Landmark::Home => vec3(0.0, 0.0, -12.0),
        Landmark::Advance => vec3(0.0, 0.0, -2.0),
        Landmark::ConfinementEntryLeft => vec3(-10.0, 0.0, -1.0),
        Landmark::ConfinementEndLeft => vec3(-10.0, 0.0, 14.0),
        Landmark::Confinement => vec3(0.0, 0.0, 16.0),
        Landmark::ConfinementEndRight => vec3(10.0, 0.0, 14.0),
        Landmark::ConfinementEntryRight => vec3(10.0, 0.0, -12.0),
    };
    match team {
        Team::Home => p,
        Team::Away => vec3(-p.x, p.y, -p.z),
    }
}
