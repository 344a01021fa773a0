//! Shared fakes for the integration tests
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dodge_core::math::vec3;
use dodge_core::{
    Agent, AgentId, Arena, BallInfo, BallState, BrainConfig, EvasionDirection, Landmark,
    MinionBrain, OpponentInfo, SimClock, Team, TeamCacheRegistry, Vec3,
};

pub struct TestMinion {
    pub id: u32,
    pub team: Team,
    pub position: Cell<Vec3>,
    pub forward: Cell<Vec3>,
    pub has_ball: Cell<bool>,
    pub confined: Cell<bool>,
    pub reached: Cell<bool>,
    pub goals: RefCell<Vec<Vec3>>,
    pub throws: RefCell<Vec<(Vec3, f32)>>,
}

impl TestMinion {
    pub fn new(id: u32, team: Team, position: Vec3) -> Rc<Self> {
        Rc::new(Self {
            id,
            team,
            position: Cell::new(position),
            forward: Cell::new(vec3(0.0, 0.0, 1.0)),
            has_ball: Cell::new(false),
            confined: Cell::new(false),
            reached: Cell::new(false),
            goals: RefCell::new(Vec::new()),
            throws: RefCell::new(Vec::new()),
        })
    }

    pub fn last_goal(&self) -> Option<Vec3> {
        self.goals.borrow().last().copied()
    }
}

impl Agent for TestMinion {
    fn id(&self) -> AgentId {
        AgentId(self.id)
    }
    fn spawn_index(&self) -> usize {
        self.id as usize
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
        Vec3::zeros()
    }
    fn held_ball_position(&self) -> Vec3 {
        self.position.get() + vec3(0.0, 1.0, 0.0)
    }
    fn throw_speed(&self) -> f32 {
        20.0
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
        false
    }
    fn tracked_ball(&self) -> Option<usize> {
        None
    }
    fn go_to(&self, target: Vec3) -> bool {
        self.goals.borrow_mut().push(target);
        true
    }
    fn face_towards(&self, _target: Vec3) {}
    fn face_towards_for_throw(&self, target: Vec3) {
        let flat = vec3(target.x, 0.0, target.z) - vec3(self.position.get().x, 0.0, self.position.get().z);
        if let Some(dir) = flat.try_normalize(1e-6) {
            self.forward.set(dir);
        }
    }
    fn throw_ball(&self, direction: Vec3, normalized_speed: f32) -> bool {
        if !self.has_ball.get() {
            return false;
        }
        self.throws.borrow_mut().push((direction, normalized_speed));
        self.has_ball.set(false);
        true
    }
    fn evade(&self, _direction: EvasionDirection, _intensity: f32) {}
    fn reached_target(&self) -> bool {
        self.reached.get()
    }
    fn display_text(&self, _text: &str) {}
}

pub struct TestCourt {
    pub team_size: usize,
    pub match_over: Cell<bool>,
    pub balls: RefCell<Vec<BallInfo>>,
    pub opponents: RefCell<Vec<OpponentInfo>>,
    pub ball_queries: Cell<usize>,
}

impl TestCourt {
    pub fn new(team_size: usize) -> Rc<Self> {
        Rc::new(Self {
            team_size,
            match_over: Cell::new(false),
            balls: RefCell::new(Vec::new()),
            opponents: RefCell::new(Vec::new()),
            ball_queries: Cell::new(0),
        })
    }
}

impl Arena for TestCourt {
    fn landmark(&self, team: Team, landmark: Landmark) -> Vec3 {
        let z = match landmark {
            Landmark::Home => -12.0,
            Landmark::Advance => -2.0,
            Landmark::Confinement => 16.0,
            _ => 0.0,
        };
        match team {
            Team::Home => vec3(0.0, 0.0, z),
            Team::Away => vec3(0.0, 0.0, -z),
        }
    }
    fn team_size(&self) -> usize {
        self.team_size
    }
    fn balls_per_team(&self) -> usize {
        1
    }
    fn total_balls(&self) -> usize {
        2
    }
    fn is_match_over(&self) -> bool {
        self.match_over.get()
    }
    fn gravity(&self) -> Vec3 {
        vec3(0.0, -9.81, 0.0)
    }
    fn opponent_info(&self, _team: Team, index: usize) -> Option<OpponentInfo> {
        self.opponents.borrow().iter().find(|o| o.index == index).copied()
    }
    fn closest_non_confined_opponent(&self, position: Vec3, _team: Team) -> Option<usize> {
        self.opponents
            .borrow()
            .iter()
            .filter(|o| !o.is_confined)
            .min_by(|a, b| (a.position - position).norm().total_cmp(&(b.position - position).norm()))
            .map(|o| o.index)
    }
    fn ball_infos(&self, _team: Team) -> Vec<BallInfo> {
        self.ball_queries.set(self.ball_queries.get() + 1);
        self.balls.borrow().clone()
    }
}

pub fn free_ball(index: usize, position: Vec3) -> BallInfo {
    BallInfo {
        index,
        position,
        nav_position: position,
        velocity: Vec3::zeros(),
        is_held: false,
        reachable: true,
        state: BallState::Neutral,
    }
}

pub fn standing_opponent(index: usize, position: Vec3) -> OpponentInfo {
    OpponentInfo {
        index,
        position,
        velocity: Vec3::zeros(),
        forward: vec3(0.0, 0.0, -1.0),
        is_confined: false,
        is_freed: false,
    }
}

/// A full Home team of brains sharing one clock and one team cache
pub struct Squad {
    pub court: Rc<TestCourt>,
    pub clock: Rc<SimClock>,
    pub minions: Vec<Rc<TestMinion>>,
    pub brains: Vec<MinionBrain>,
}

impl Squad {
    pub fn new(team_size: usize) -> Self {
        let court = TestCourt::new(team_size);
        let clock = Rc::new(SimClock::new());
        let mut registry = TeamCacheRegistry::new();
        let mut minions = Vec::new();
        let mut brains = Vec::new();
        for id in 0..team_size as u32 {
            let minion = TestMinion::new(id, Team::Home, vec3(id as f32, 0.0, -12.0));
            let brain = MinionBrain::new(
                minion.clone(),
                court.clone(),
                clock.clone(),
                &mut registry,
                BrainConfig::default(),
            )
            .expect("brain wiring");
            minions.push(minion);
            brains.push(brain);
        }
        Self { court, clock, minions, brains }
    }

    /// Advance the clock and update every brain once
    pub fn tick(&mut self, dt: f32) {
        self.clock.advance(dt);
        for brain in &mut self.brains {
            brain.update().expect("brain update");
        }
    }
}
