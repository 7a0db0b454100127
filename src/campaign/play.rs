use crate::error::{CampaignError, StoreError};
use crate::generator::ExecutionRequest;
use crate::store::CreateObject;
use tracing::info;

use super::context::CampaignContext;
use super::planner::SessionOptions;
use super::types::{Plan, PlayResult, Session, SessionProperties};

/// Run a plan through the summarizer and store the resulting session
pub async fn play_session(
    ctx: &CampaignContext,
    plan: &Plan,
    options: &SessionOptions,
) -> Result<Session, CampaignError> {
    info!(
        "Playing session {} of campaign {} ({})",
        plan.session_number(),
        plan.properties.campaign_id,
        plan.name
    );

    let request = ExecutionRequest {
        data: serde_json::json!({ "sessionPlan": plan.properties_value() }),
        result_schema: Some(ctx.session_schema()),
        config: ctx.execution_config(options.model.as_deref(), options.environment.as_deref()),
    };

    let interaction = ctx.config.interactions.summarizer.as_str();
    let played: PlayResult = ctx
        .generator()
        .execute(interaction, &request)
        .await
        .and_then(|result| result.into_typed())
        .map_err(|e| CampaignError::generation(interaction, e))?;

    let properties = SessionProperties {
        campaign_id: plan.properties.campaign_id.clone(),
        session_number: plan.session_number(),
        summary: played.summary,
    };
    let name = format!(
        "[{}] Session {}",
        properties.campaign_id, properties.session_number
    );

    let payload = serde_json::to_value(&properties)
        .map_err(|e| CampaignError::persistence("encoding session", StoreError::Serialize(e)))?;
    let created = ctx
        .store()
        .create(CreateObject {
            type_id: ctx.session_type().id.clone(),
            properties: payload,
            name,
            parent: Some(plan.id.clone()),
            text: Some(properties.summary.clone()),
        })
        .await
        .map_err(|e| CampaignError::persistence("creating session", e))?;

    info!("Session summary saved: {}", created.id);

    Ok(Session {
        id: created.id,
        name: created.name,
        properties,
        text: created.text,
        parent: created.parent,
    })
}
