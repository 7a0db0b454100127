use crate::config::Config;
use crate::error::CampaignError;
use crate::generator::{ContentGenerator, ExecutionConfig};
use crate::store::{ObjectType, RecordStore};
use schemars::schema_for;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use super::types::{PlanProperties, SessionProperties};

/// Everything one command needs to talk to the store and the generator.
///
/// Built once by [`CampaignContext::connect`], which resolves the plan and
/// session record types up front; no reconciliation or generation can run
/// without both.
pub struct CampaignContext {
    pub config: Config,
    store: Arc<dyn RecordStore>,
    generator: Arc<dyn ContentGenerator>,
    plan_type: ObjectType,
    session_type: ObjectType,
}

impl CampaignContext {
    pub async fn connect(
        config: Config,
        store: Arc<dyn RecordStore>,
        generator: Arc<dyn ContentGenerator>,
    ) -> Result<Self, CampaignError> {
        debug!(
            plan = %config.types.plan,
            session = %config.types.session,
            "Resolving record types"
        );

        let (plan_type, session_type) = futures::try_join!(
            store.resolve_type(&config.types.plan),
            store.resolve_type(&config.types.session),
        )
        .map_err(|e| CampaignError::persistence("resolving record types", e))?;

        let plan_type = plan_type.ok_or_else(|| CampaignError::SchemaUnavailable {
            type_name: config.types.plan.clone(),
        })?;
        let session_type = session_type.ok_or_else(|| CampaignError::SchemaUnavailable {
            type_name: config.types.session.clone(),
        })?;

        info!(
            "Resolved record types: {} ({}), {} ({})",
            plan_type.name, plan_type.id, session_type.name, session_type.id
        );

        Ok(Self {
            config,
            store,
            generator,
            plan_type,
            session_type,
        })
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    pub fn generator(&self) -> &dyn ContentGenerator {
        self.generator.as_ref()
    }

    pub fn plan_type(&self) -> &ObjectType {
        &self.plan_type
    }

    pub fn session_type(&self) -> &ObjectType {
        &self.session_type
    }

    /// Result schema for the planner: the store's schema, or the local shape
    pub fn plan_schema(&self) -> Value {
        self.plan_type
            .object_schema
            .clone()
            .unwrap_or_else(|| schema_value(schema_for!(PlanProperties)))
    }

    /// Result schema for the summarizer
    pub fn session_schema(&self) -> Value {
        self.session_type
            .object_schema
            .clone()
            .unwrap_or_else(|| schema_value(schema_for!(SessionProperties)))
    }

    /// Per-call overrides, falling back to the configured defaults
    pub fn execution_config(&self, model: Option<&str>, environment: Option<&str>) -> ExecutionConfig {
        let generation = &self.config.generation;
        ExecutionConfig {
            environment: environment
                .map(str::to_string)
                .or_else(|| generation.environment.clone()),
            model: model.map(str::to_string).or_else(|| generation.model.clone()),
        }
    }
}

fn schema_value(schema: schemars::schema::RootSchema) -> Value {
    serde_json::to_value(schema).unwrap_or(Value::Null)
}
