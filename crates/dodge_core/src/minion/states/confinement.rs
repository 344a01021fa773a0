//! Confinement States
//!
//! Walking into the confinement zone along the left gutter, and back out
//! along the right one once freed.

use super::announce;
use crate::fsm::State;
use crate::minion::{MinionContext, MinionPayload, MinionStateId, MinionTransition};
use crate::world::Landmark;

const ENTRY_ROUTE: [Landmark; 3] =
    [Landmark::ConfinementEntryLeft, Landmark::ConfinementEndLeft, Landmark::Confinement];

const EXIT_ROUTE: [Landmark; 2] = [Landmark::ConfinementEndRight, Landmark::ConfinementEntryRight];

/// Position along a fixed landmark route
#[derive(Debug, Clone, Copy, Default)]
struct Waypoints {
    index: usize,
}

impl Waypoints {
    fn start(&mut self, ctx: &MinionContext, route: &[Landmark]) {
        self.index = 0;
        if let Some(&first) = route.first() {
            ctx.go_to(ctx.landmark(first), "waypoint");
        }
    }

    /// Head for the next waypoint once the current one is reached.
    /// Returns `true` when the last one has been reached.
    fn advance(&mut self, ctx: &MinionContext, route: &[Landmark]) -> bool {
        if !ctx.agent.reached_target() {
            return false;
        }
        match route.get(self.index + 1) {
            Some(&next) => {
                self.index += 1;
                ctx.go_to(ctx.landmark(next), "waypoint");
                false
            }
            None => true,
        }
    }
}

pub(in crate::minion) struct GoToConfinement {
    waypoints: Waypoints,
}

impl GoToConfinement {
    pub fn new() -> Self {
        Self { waypoints: Waypoints::default() }
    }
}

impl State<MinionStateId, MinionContext, MinionPayload> for GoToConfinement {
    fn id(&self) -> MinionStateId {
        MinionStateId::GoToConfinement
    }

    fn enter(&mut self, ctx: &MinionContext, _payload: Option<MinionPayload>) {
        announce(ctx, self.id());
        log::info!("agent {} heads to confinement", ctx.agent.id());
        self.waypoints.start(ctx, &ENTRY_ROUTE);
    }

    fn update(&mut self, ctx: &MinionContext) -> Option<MinionTransition> {
        if !ctx.agent.is_confined() {
            return Some(MinionTransition::to(MinionStateId::LeaveConfinement));
        }
        if self.waypoints.advance(ctx, &ENTRY_ROUTE) {
            ctx.agent.face_towards(ctx.landmark(Landmark::Home));
        }
        None
    }
}

pub(in crate::minion) struct LeaveConfinement {
    waypoints: Waypoints,
}

impl LeaveConfinement {
    pub fn new() -> Self {
        Self { waypoints: Waypoints::default() }
    }
}

impl State<MinionStateId, MinionContext, MinionPayload> for LeaveConfinement {
    fn id(&self) -> MinionStateId {
        MinionStateId::LeaveConfinement
    }

    fn enter(&mut self, ctx: &MinionContext, _payload: Option<MinionPayload>) {
        announce(ctx, self.id());
        log::info!("agent {} released from confinement", ctx.agent.id());
        self.waypoints.start(ctx, &EXIT_ROUTE);
    }

    fn update(&mut self, ctx: &MinionContext) -> Option<MinionTransition> {
        if !self.waypoints.advance(ctx, &EXIT_ROUTE) {
            return None;
        }
        if ctx.agent.has_ball() {
            Some(MinionTransition::to(MinionStateId::GoToThrowSpot))
        } else {
            Some(MinionTransition::to(MinionStateId::GoHome))
        }
    }
}
