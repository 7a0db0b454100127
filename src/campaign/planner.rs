use crate::config::GuidesConfig;
use crate::error::{CampaignError, GeneratorError, StoreError};
use crate::generator::ExecutionRequest;
use crate::store::CreateObject;
use serde_json::{Map, Value};
use std::collections::VecDeque;
use tracing::{debug, info};
use uuid::Uuid;

use super::context::CampaignContext;
use super::reconcile::{reconcile, Reconciliation};
use super::types::{PartyInfo, Plan, PlanProperties, Record};

/// Caller-supplied knobs for plan generation and execution
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub objectives: Vec<String>,
    pub level: Option<u32>,
    pub size: Option<u32>,
    pub theme: Option<String>,
    pub model: Option<String>,
    pub environment: Option<String>,
}

/// Where the plan for a turn came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSource {
    Reused,
    Generated,
}

impl std::fmt::Display for PlanSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanSource::Reused => write!(f, "reused"),
            PlanSource::Generated => write!(f, "generated"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AcquiredPlan {
    pub plan: Plan,
    pub source: PlanSource,
}

/// Picks the session guide for a session number
pub struct GuideSelector<'a> {
    guides: &'a GuidesConfig,
}

impl<'a> GuideSelector<'a> {
    pub fn new(guides: &'a GuidesConfig) -> Self {
        Self { guides }
    }

    pub fn select(&self, session_number: u32) -> &'a str {
        if let Some(guide) = self.guides.by_session.get(&session_number) {
            return guide;
        }
        if session_number == 0 {
            &self.guides.opening
        } else {
            &self.guides.default
        }
    }
}

/// Session number for a new plan given how many plans the campaign already has
pub fn next_session_number(previous_plans: usize) -> Result<u32, CampaignError> {
    u32::try_from(previous_plans).map_err(|_| CampaignError::SessionLimit {
        plans: previous_plans,
    })
}

/// Take the next queued plan, or generate a new one when the queue is empty
pub async fn next_plan(
    ctx: &CampaignContext,
    queue: &mut VecDeque<Plan>,
    campaign_id: &str,
    options: &SessionOptions,
) -> Result<AcquiredPlan, CampaignError> {
    if let Some(plan) = queue.pop_front() {
        debug!("Reusing unplayed plan {} ({})", plan.name, plan.id);
        return Ok(AcquiredPlan {
            plan,
            source: PlanSource::Reused,
        });
    }

    let plan = plan_session(ctx, Some(campaign_id), options).await?;
    Ok(AcquiredPlan {
        plan,
        source: PlanSource::Generated,
    })
}

/// Generate and store a new plan.
///
/// Without a campaign id this opens a new campaign at session 0; the
/// campaign id then comes from the planner's result, or a fresh UUID when
/// the planner did not supply one.
pub async fn plan_session(
    ctx: &CampaignContext,
    campaign_id: Option<&str>,
    options: &SessionOptions,
) -> Result<Plan, CampaignError> {
    let previous = match campaign_id {
        Some(id) => reconcile(ctx, id).await?,
        None => Reconciliation::default(),
    };

    let session_number = next_session_number(previous.plans.len())?;
    let guide = GuideSelector::new(&ctx.config.guides).select(session_number);
    let party = PartyInfo {
        level: options.level.unwrap_or(ctx.config.party.level),
        size: options.size.unwrap_or(ctx.config.party.size),
        classes: ctx.config.party.classes.clone(),
    };

    info!(
        "Planning session {} for campaign {}",
        session_number,
        campaign_id.unwrap_or("<new>")
    );

    let data = serde_json::json!({
        "partyInfo": party,
        "sessionNumber": session_number,
        "sessionGuide": guide,
        "campaignSetting": options.theme,
        "previousSessionsSummaries": previous
            .sessions
            .iter()
            .map(Record::properties_value)
            .collect::<Vec<_>>(),
        "previousPlans": previous
            .plans
            .iter()
            .map(Record::properties_value)
            .collect::<Vec<_>>(),
        "currentObjectives": options.objectives,
    });

    let request = ExecutionRequest {
        data,
        result_schema: Some(ctx.plan_schema()),
        config: ctx.execution_config(options.model.as_deref(), options.environment.as_deref()),
    };

    let interaction = ctx.config.interactions.planner.as_str();
    let mut generated: Map<String, Value> = ctx
        .generator()
        .execute(interaction, &request)
        .await
        .and_then(|result| result.into_typed())
        .map_err(|e| CampaignError::generation(interaction, e))?;

    // The engine owns numbering; whatever the planner echoed is replaced
    generated.insert("sessionNumber".to_string(), session_number.into());
    let mut properties: PlanProperties = serde_json::from_value(Value::Object(generated))
        .map_err(|e| CampaignError::generation(interaction, GeneratorError::Shape(e)))?;

    match campaign_id {
        Some(id) => properties.campaign_id = id.to_string(),
        None if properties.campaign_id.is_empty() => {
            properties.campaign_id = Uuid::new_v4().to_string();
        }
        None => {}
    }
    if properties.session_guide.is_none() {
        properties.session_guide = Some(guide.to_string());
    }
    if properties.party.is_none() {
        properties.party = Some(party);
    }
    if properties.objectives.is_empty() {
        properties.objectives = options.objectives.clone();
    }

    let name = format!("[{}] {}", properties.campaign_id, properties.title);
    info!("Saving session plan {}", name);

    let payload = serde_json::to_value(&properties)
        .map_err(|e| CampaignError::persistence("encoding plan", StoreError::Serialize(e)))?;
    let created = ctx
        .store()
        .create(CreateObject {
            type_id: ctx.plan_type().id.clone(),
            properties: payload,
            name,
            parent: None,
            text: None,
        })
        .await
        .map_err(|e| CampaignError::persistence("creating plan", e))?;

    info!("Session plan saved: {}", created.id);

    Ok(Plan {
        id: created.id,
        name: created.name,
        properties,
        text: created.text,
        parent: created.parent,
    })
}
