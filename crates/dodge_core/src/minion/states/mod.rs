//! Minion state implementations
//!
//! One struct per behaviour. Every `enter` announces the state on the agent's
//! debug text sink before doing its own work.

mod collect_ball;
mod confinement;
mod defensive;
mod global;
mod go_to_throw_spot;
mod home;
mod rescue;
mod throw_ball;

pub(super) use collect_ball::CollectBall;
pub(super) use confinement::{GoToConfinement, LeaveConfinement};
pub(super) use defensive::DefensiveEvasion;
pub(super) use global::GlobalEvaluator;
pub(super) use go_to_throw_spot::GoToThrowSpot;
pub(super) use home::{GoHome, Rest};
pub(super) use rescue::Rescue;
pub(super) use throw_ball::ThrowBall;

use super::{MinionContext, MinionStateId};

fn announce(ctx: &MinionContext, id: MinionStateId) {
    ctx.agent.display_text(id.name());
    log::trace!("agent {} entered {}", ctx.agent.id(), id);
}
