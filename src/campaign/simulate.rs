use crate::error::CampaignError;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::info;

use super::context::CampaignContext;
use super::planner::{next_plan, PlanSource, SessionOptions};
use super::play::play_session;
use super::reconcile::reconcile;

/// One completed turn
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// 1-based
    pub turn: u32,
    pub plan_name: String,
    pub plan_source: PlanSource,
    pub session_number: u32,
    pub session_name: String,
    pub summary: String,
}

#[derive(Debug)]
pub struct SimulationReport {
    pub campaign_id: String,
    pub turns: Vec<TurnOutcome>,
    pub total_duration: Duration,
}

impl SimulationReport {
    pub fn generated_plans(&self) -> usize {
        self.turns
            .iter()
            .filter(|t| t.plan_source == PlanSource::Generated)
            .count()
    }

    pub fn reused_plans(&self) -> usize {
        self.turns.len() - self.generated_plans()
    }
}

/// Play `turns` sessions of a campaign back to back.
///
/// The unplayed-plan queue is taken from a single reconciliation at the
/// start and drained as turns consume it; it is not refreshed while the run
/// creates new sessions. Any failure ends the run, leaving earlier turns
/// stored.
pub async fn simulate<F>(
    ctx: &CampaignContext,
    campaign_id: &str,
    turns: u32,
    options: &SessionOptions,
    mut on_turn: F,
) -> Result<SimulationReport, CampaignError>
where
    F: FnMut(&TurnOutcome),
{
    let start = Instant::now();
    let mut queue: VecDeque<_> = reconcile(ctx, campaign_id).await?.unplayed_plans.into();

    info!(
        "Simulating {} turns for campaign {} ({} unplayed plans queued)",
        turns,
        campaign_id,
        queue.len()
    );

    let mut outcomes = Vec::new();
    for turn in 1..=turns {
        let acquired = next_plan(ctx, &mut queue, campaign_id, options).await?;
        info!(
            "Playing turn {} with {} plan {}",
            turn, acquired.source, acquired.plan.name
        );

        let session = play_session(ctx, &acquired.plan, options).await?;

        let outcome = TurnOutcome {
            turn,
            plan_name: acquired.plan.name,
            plan_source: acquired.source,
            session_number: session.session_number(),
            session_name: session.name,
            summary: session.properties.summary,
        };
        on_turn(&outcome);
        outcomes.push(outcome);
    }

    Ok(SimulationReport {
        campaign_id: campaign_id.to_string(),
        turns: outcomes,
        total_duration: start.elapsed(),
    })
}
