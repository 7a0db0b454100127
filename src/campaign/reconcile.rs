use crate::error::{CampaignError, StoreError};
use crate::store::{ObjectType, Query};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use tracing::info;

use super::context::CampaignContext;
use super::types::{sort_by_session, Plan, Record, Session, SessionNumbered};

/// Plans and sessions of one campaign, ordered by session number
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    pub plans: Vec<Plan>,
    pub sessions: Vec<Session>,
    /// Plans with no session of the same number, in plan order
    pub unplayed_plans: Vec<Plan>,
}

/// Fetch a campaign's plans and sessions and work out which plans are unplayed
pub async fn reconcile(
    ctx: &CampaignContext,
    campaign_id: &str,
) -> Result<Reconciliation, CampaignError> {
    if campaign_id.is_empty() {
        return Err(CampaignError::MissingIdentifier);
    }

    let mut sessions: Vec<Session> = fetch(ctx, ctx.session_type(), campaign_id).await?;
    info!(
        "Found {} previous sessions for campaign {}",
        sessions.len(),
        campaign_id
    );

    let mut plans: Vec<Plan> = fetch(ctx, ctx.plan_type(), campaign_id).await?;
    info!(
        "Found {} previous plans for campaign {}",
        plans.len(),
        campaign_id
    );

    sort_by_session(&mut plans);
    sort_by_session(&mut sessions);

    let unplayed_plans = unplayed(&plans, &sessions);
    info!(
        "Found {} unplayed plans for campaign {}: {:?}",
        unplayed_plans.len(),
        campaign_id,
        unplayed_plans
            .iter()
            .map(|p| p.properties.title.as_str())
            .collect::<Vec<_>>()
    );

    Ok(Reconciliation {
        plans,
        sessions,
        unplayed_plans,
    })
}

/// Sessions of a campaign in play order
pub async fn read_sessions(
    ctx: &CampaignContext,
    campaign_id: &str,
) -> Result<Vec<Session>, CampaignError> {
    if campaign_id.is_empty() {
        return Err(CampaignError::MissingIdentifier);
    }
    let mut sessions: Vec<Session> = fetch(ctx, ctx.session_type(), campaign_id).await?;
    sort_by_session(&mut sessions);
    Ok(sessions)
}

/// Plans whose session number no session carries, keeping plan order
pub fn unplayed(plans: &[Plan], sessions: &[Session]) -> Vec<Plan> {
    let played: HashSet<u32> = sessions.iter().map(|s| s.session_number()).collect();
    plans
        .iter()
        .filter(|p| !played.contains(&p.session_number()))
        .cloned()
        .collect()
}

async fn fetch<P>(
    ctx: &CampaignContext,
    object_type: &ObjectType,
    campaign_id: &str,
) -> Result<Vec<Record<P>>, CampaignError>
where
    P: DeserializeOwned + SessionNumbered,
{
    let query = Query::campaign(&object_type.id, campaign_id);
    let objects = ctx
        .store()
        .find(&query)
        .await
        .map_err(|e| CampaignError::persistence("querying records", e))?;

    objects
        .into_iter()
        .map(Record::try_from)
        .collect::<Result<Vec<_>, StoreError>>()
        .map_err(|e| CampaignError::persistence("reading records", e))
}
