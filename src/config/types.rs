use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::defaults::*;

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    #[serde(default)]
    pub connection: ConnectionConfig,

    #[serde(default)]
    pub types: TypesConfig,

    #[serde(default)]
    pub interactions: InteractionsConfig,

    #[serde(default)]
    pub guides: GuidesConfig,

    #[serde(default)]
    pub party: PartyConfig,

    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Where the studio (types, interactions) and the object store live
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ConnectionConfig {
    #[serde(default)]
    pub studio_url: Option<String>,

    #[serde(default)]
    pub store_url: Option<String>,

    /// Exchanged for a bearer token at connect time
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub project_id: Option<String>,

    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            studio_url: None,
            store_url: None,
            api_key: None,
            project_id: None,
            timeout_sec: default_timeout_sec(),
        }
    }
}

/// Names of the record types in the content store
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct TypesConfig {
    #[serde(default = "default_plan_type")]
    pub plan: String,

    #[serde(default = "default_session_type")]
    pub session: String,
}

impl Default for TypesConfig {
    fn default() -> Self {
        Self {
            plan: default_plan_type(),
            session: default_session_type(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct InteractionsConfig {
    #[serde(default = "default_planner_interaction")]
    pub planner: String,

    #[serde(default = "default_summarizer_interaction")]
    pub summarizer: String,
}

impl Default for InteractionsConfig {
    fn default() -> Self {
        Self {
            planner: default_planner_interaction(),
            summarizer: default_summarizer_interaction(),
        }
    }
}

/// Session guide references handed to the planner
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct GuidesConfig {
    /// Guide for session 0
    #[serde(default = "default_opening_guide")]
    pub opening: String,

    /// Guide for every other session without an explicit entry
    #[serde(default = "default_session_guide")]
    pub default: String,

    /// Per-session-number overrides
    #[serde(default)]
    pub by_session: BTreeMap<u32, String>,
}

impl Default for GuidesConfig {
    fn default() -> Self {
        Self {
            opening: default_opening_guide(),
            default: default_session_guide(),
            by_session: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct PartyConfig {
    #[serde(default = "default_party_level")]
    pub level: u32,

    #[serde(default = "default_party_size")]
    pub size: u32,

    #[serde(default = "default_party_classes")]
    pub classes: Vec<String>,
}

impl Default for PartyConfig {
    fn default() -> Self {
        Self {
            level: default_party_level(),
            size: default_party_size(),
            classes: default_party_classes(),
        }
    }
}

/// Execution overrides passed with every interaction call
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct GenerationConfig {
    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub environment: Option<String>,
}
