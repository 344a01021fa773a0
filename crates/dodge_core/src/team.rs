//! Shared Team Cache
//!
//! One [`TeamCache`] per team and match, shared by every agent of the team
//! through `Rc`. It holds the roster and a one-slot ball snapshot keyed by the
//! simulation tick: the first read on a new tick queries the arena, every
//! other read on the same tick reuses the result.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::TeamError;
use crate::world::{Agent, AgentId, Arena, BallInfo, Team};

struct BallSnapshot {
    tick: u64,
    balls: Rc<[BallInfo]>,
}

pub struct TeamCache {
    team: Team,
    team_size: usize,
    num_balls: usize,
    roster: RefCell<Vec<Rc<dyn Agent>>>,
    snapshot: RefCell<Option<BallSnapshot>>,
    queries: Cell<u64>,
}

impl TeamCache {
    pub fn new(team: Team, team_size: usize, num_balls: usize) -> Self {
        Self {
            team,
            team_size,
            num_balls,
            roster: RefCell::new(Vec::with_capacity(team_size)),
            snapshot: RefCell::new(None),
            queries: Cell::new(0),
        }
    }

    pub fn team(&self) -> Team {
        self.team
    }

    /// Roster capacity
    pub fn team_size(&self) -> usize {
        self.team_size
    }

    pub fn num_balls(&self) -> usize {
        self.num_balls
    }

    /// Add a teammate to the roster.
    pub fn register(&self, agent: Rc<dyn Agent>) -> Result<(), TeamError> {
        let id = agent.id();
        if agent.team() != self.team {
            return Err(TeamError::WrongTeam { agent: id.0 });
        }

        let mut roster = self.roster.borrow_mut();
        if roster.iter().any(|m| m.id() == id) {
            return Err(TeamError::DuplicateMember { agent: id.0 });
        }
        if roster.len() >= self.team_size {
            return Err(TeamError::RosterFull { capacity: self.team_size });
        }

        roster.push(agent);
        log::debug!("{:?} roster {}/{}: registered agent {}", self.team, roster.len(), self.team_size, id);
        Ok(())
    }

    pub fn registered(&self) -> usize {
        self.roster.borrow().len()
    }

    /// Every roster slot is filled
    pub fn is_fully_initialized(&self) -> bool {
        self.registered() >= self.team_size
    }

    /// Registered teammates, in registration order
    pub fn members(&self) -> Vec<Rc<dyn Agent>> {
        self.roster.borrow().clone()
    }

    pub fn member(&self, id: AgentId) -> Option<Rc<dyn Agent>> {
        self.roster.borrow().iter().find(|m| m.id() == id).cloned()
    }

    /// Ball snapshot for `tick`; queries the arena at most once per tick.
    pub fn balls(&self, arena: &dyn Arena, tick: u64) -> Rc<[BallInfo]> {
        if let Some(snapshot) = self.snapshot.borrow().as_ref() {
            if snapshot.tick == tick {
                return Rc::clone(&snapshot.balls);
            }
        }

        let balls: Rc<[BallInfo]> = arena.ball_infos(self.team).into();
        self.queries.set(self.queries.get() + 1);
        *self.snapshot.borrow_mut() = Some(BallSnapshot { tick, balls: Rc::clone(&balls) });
        balls
    }

    /// Number of arena ball queries issued so far
    pub fn query_count(&self) -> u64 {
        self.queries.get()
    }
}

/// Lazily created team caches for one match.
#[derive(Default)]
pub struct TeamCacheRegistry {
    caches: HashMap<Team, Rc<TeamCache>>,
}

impl TeamCacheRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The team's cache, created from the arena's settings on first use.
    pub fn get_or_create(&mut self, team: Team, arena: &dyn Arena) -> Rc<TeamCache> {
        let cache = self.caches.entry(team).or_insert_with(|| {
            log::debug!("creating team cache for {:?}", team);
            Rc::new(TeamCache::new(team, arena.team_size(), arena.total_balls()))
        });
        Rc::clone(cache)
    }

    pub fn get(&self, team: Team) -> Option<Rc<TeamCache>> {
        self.caches.get(&team).cloned()
    }
}
