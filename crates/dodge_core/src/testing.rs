//! Recording fakes for unit tests

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::BrainConfig;
use crate::math::{horizontal, normalize_or_zero, vec3, Vec3};
use crate::minion::MinionContext;
use crate::team::TeamCache;
use crate::world::{
    Agent, AgentId, Arena, BallInfo, BallState, EvasionDirection, Landmark, OpponentInfo,
    SimClock, Team,
};

pub(crate) struct FakeAgent {
    pub id: u32,
    pub spawn_index: usize,
    pub team: Team,
    pub position: Cell<Vec3>,
    pub forward: Cell<Vec3>,
    pub velocity: Cell<Vec3>,
    pub throw_speed: Cell<f32>,
    pub evade_cooldown: f32,
    pub has_ball: Cell<bool>,
    pub confined: Cell<bool>,
    pub rescuable: Cell<bool>,
    pub tracked: Cell<Option<usize>>,
    pub reached: Cell<bool>,
    pub path_exists: Cell<bool>,
    pub releases: Cell<bool>,
    pub goals: RefCell<Vec<Vec3>>,
    pub facings: RefCell<Vec<Vec3>>,
    pub throws: RefCell<Vec<(Vec3, f32)>>,
    pub evades: RefCell<Vec<(EvasionDirection, f32)>>,
    pub texts: RefCell<Vec<String>>,
}

impl FakeAgent {
    pub fn new(id: u32, team: Team) -> Self {
        Self {
            id,
            spawn_index: id as usize,
            team,
            position: Cell::new(Vec3::zeros()),
            forward: Cell::new(vec3(0.0, 0.0, 1.0)),
            velocity: Cell::new(Vec3::zeros()),
            throw_speed: Cell::new(20.0),
            evade_cooldown: 1.0,
            has_ball: Cell::new(false),
            confined: Cell::new(false),
            rescuable: Cell::new(false),
            tracked: Cell::new(None),
            reached: Cell::new(false),
            path_exists: Cell::new(true),
            releases: Cell::new(true),
            goals: RefCell::new(Vec::new()),
            facings: RefCell::new(Vec::new()),
            throws: RefCell::new(Vec::new()),
            evades: RefCell::new(Vec::new()),
            texts: RefCell::new(Vec::new()),
        }
    }

    pub fn at(self, position: Vec3) -> Self {
        self.position.set(position);
        self
    }

    pub fn shared(self) -> Rc<Self> {
        Rc::new(self)
    }

    pub fn last_goal(&self) -> Option<Vec3> {
        self.goals.borrow().last().copied()
    }

    pub fn last_text(&self) -> Option<String> {
        self.texts.borrow().last().cloned()
    }
}

impl Agent for FakeAgent {
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
        self.position.get() + vec3(0.0, 1.0, 0.0)
    }
    fn throw_speed(&self) -> f32 {
        self.throw_speed.get()
    }
    fn evade_cooldown_secs(&self) -> f32 {
        self.evade_cooldown
    }
    fn has_ball(&self) -> bool {
        self.has_ball.get()
    }
    fn is_confined(&self) -> bool {
        self.confined.get()
    }
    fn can_be_rescued(&self) -> bool {
        self.rescuable.get()
    }
    fn tracked_ball(&self) -> Option<usize> {
        self.tracked.get()
    }
    fn go_to(&self, target: Vec3) -> bool {
        self.goals.borrow_mut().push(target);
        self.path_exists.get()
    }
    fn face_towards(&self, target: Vec3) {
        self.facings.borrow_mut().push(target);
    }
    fn face_towards_for_throw(&self, target: Vec3) {
        self.facings.borrow_mut().push(target);
        let dir = normalize_or_zero(&horizontal(&(target - self.position.get())));
        if dir != Vec3::zeros() {
            self.forward.set(dir);
        }
    }
    fn throw_ball(&self, direction: Vec3, normalized_speed: f32) -> bool {
        self.throws.borrow_mut().push((direction, normalized_speed));
        let released = self.releases.get() && self.has_ball.get();
        if released {
            self.has_ball.set(false);
        }
        released
    }
    fn evade(&self, direction: EvasionDirection, intensity: f32) {
        self.evades.borrow_mut().push((direction, intensity));
    }
    fn reached_target(&self) -> bool {
        self.reached.get()
    }
    fn display_text(&self, text: &str) {
        self.texts.borrow_mut().push(text.to_string());
    }
}

/// Court along Z: Home team at negative Z, Away team mirrored.
pub(crate) fn landmark_position(team: Team, landmark: Landmark) -> Vec3 {
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

pub(crate) fn ball(index: usize, position: Vec3, state: BallState) -> BallInfo {
    BallInfo {
        index,
        position,
        nav_position: position,
        velocity: Vec3::zeros(),
        is_held: state == BallState::Held,
        reachable: true,
        state,
    }
}

pub(crate) fn opponent(index: usize, position: Vec3) -> OpponentInfo {
    OpponentInfo {
        index,
        position,
        velocity: Vec3::zeros(),
        forward: vec3(0.0, 0.0, -1.0),
        is_confined: false,
        is_freed: false,
    }
}

pub(crate) struct FakeArena {
    pub team_size: usize,
    pub balls_per_team: usize,
    pub match_over: Cell<bool>,
    pub gravity: Vec3,
    pub balls: RefCell<Vec<BallInfo>>,
    pub opponents: RefCell<Vec<OpponentInfo>>,
    pub ball_queries: Cell<usize>,
}

impl FakeArena {
    pub fn new(team_size: usize, balls_per_team: usize) -> Self {
        Self {
            team_size,
            balls_per_team,
            match_over: Cell::new(false),
            gravity: vec3(0.0, -9.81, 0.0),
            balls: RefCell::new(Vec::new()),
            opponents: RefCell::new(Vec::new()),
            ball_queries: Cell::new(0),
        }
    }
}

impl Arena for FakeArena {
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
        self.gravity
    }
    fn opponent_info(&self, _team: Team, index: usize) -> Option<OpponentInfo> {
        self.opponents.borrow().iter().find(|o| o.index == index).copied()
    }
    fn closest_non_confined_opponent(&self, position: Vec3, _team: Team) -> Option<usize> {
        self.opponents
            .borrow()
            .iter()
            .filter(|o| !o.is_confined)
            .min_by(|a, b| {
                let da = (a.position - position).norm();
                let db = (b.position - position).norm();
                da.total_cmp(&db)
            })
            .map(|o| o.index)
    }
    fn ball_infos(&self, _team: Team) -> Vec<BallInfo> {
        self.ball_queries.set(self.ball_queries.get() + 1);
        self.balls.borrow().clone()
    }
}

/// A minion context around fresh fakes; the controlled agent is roster slot 0.
pub(crate) struct Rig {
    pub ctx: MinionContext,
    pub agent: Rc<FakeAgent>,
    pub arena: Rc<FakeArena>,
    pub mates: Vec<Rc<FakeAgent>>,
}

pub(crate) fn rig(team_size: usize, balls_per_team: usize) -> Rig {
    let arena = Rc::new(FakeArena::new(team_size, balls_per_team));
    let cache = Rc::new(TeamCache::new(Team::Home, team_size, balls_per_team * 2));
    let members: Vec<Rc<FakeAgent>> = (0..team_size as u32)
        .map(|id| FakeAgent::new(id, Team::Home).at(landmark_position(Team::Home, Landmark::Home)).shared())
        .collect();
    for member in &members {
        cache.register(member.clone()).unwrap();
    }

    let agent = members[0].clone();
    let ctx = MinionContext {
        agent: agent.clone(),
        arena: arena.clone(),
        team: Team::Home,
        team_cache: cache,
        clock: Rc::new(SimClock::new()),
        config: BrainConfig::default(),
    };
    Rig { ctx, agent, arena, mates: members[1..].to_vec() }
}
