//! Campaign session engine: reconciliation, plan acquisition and the turn loop
//!
//! 1. `reconcile` fetches a campaign's plans and sessions and finds unplayed plans
//! 2. `next_plan` reuses a queued plan or asks the planner for a new one
//! 3. `simulate` alternates plan acquisition and play for a number of turns

mod context;
mod planner;
mod play;
mod reconcile;
mod simulate;
mod types;

pub use context::CampaignContext;
pub use planner::{plan_session, PlanSource, SessionOptions};
pub use reconcile::read_sessions;
pub use simulate::{simulate, TurnOutcome};
pub use types::{PlanProperties, SessionProperties};

#[cfg(test)]
pub use types::{Plan, Session};
