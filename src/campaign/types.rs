//! Typed plan and session records

use crate::error::StoreError;
use crate::store::ContentObject;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Party composition handed to the planner and echoed in generated plans
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct PartyInfo {
    pub level: u32,
    pub size: u32,
    pub classes: Vec<String>,
}

/// Properties of a generated session plan
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanProperties {
    #[serde(default)]
    pub campaign_id: String,

    pub session_number: u32,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party: Option<PartyInfo>,

    #[serde(default)]
    pub objectives: Vec<String>,

    /// Generated narrative for the session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Guide template the plan was generated from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_guide: Option<String>,

    /// Any other fields the planner produced
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Properties of a played session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionProperties {
    pub campaign_id: String,
    pub session_number: u32,
    pub summary: String,
}

/// What the summarizer interaction returns
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PlayResult {
    pub summary: String,
}

pub trait SessionNumbered {
    fn session_number(&self) -> u32;
}

impl SessionNumbered for PlanProperties {
    fn session_number(&self) -> u32 {
        self.session_number
    }
}

impl SessionNumbered for SessionProperties {
    fn session_number(&self) -> u32 {
        self.session_number
    }
}

/// A stored record with properties of a declared shape
#[derive(Debug, Clone, PartialEq)]
pub struct Record<P> {
    pub id: String,
    pub name: String,
    pub properties: P,
    pub text: Option<String>,
    pub parent: Option<String>,
}

pub type Plan = Record<PlanProperties>;
pub type Session = Record<SessionProperties>;

impl<P: SessionNumbered> Record<P> {
    pub fn session_number(&self) -> u32 {
        self.properties.session_number()
    }
}

impl<P: Serialize> Record<P> {
    /// Properties as the untyped document stored on the record
    pub fn properties_value(&self) -> Value {
        serde_json::to_value(&self.properties).unwrap_or(Value::Null)
    }
}

impl<P: DeserializeOwned> TryFrom<ContentObject> for Record<P> {
    type Error = StoreError;

    fn try_from(obj: ContentObject) -> Result<Self, Self::Error> {
        let properties = serde_json::from_value(obj.properties).map_err(|source| {
            StoreError::Shape {
                id: obj.id.clone(),
                source,
            }
        })?;
        Ok(Self {
            id: obj.id,
            name: obj.name,
            properties,
            text: obj.text,
            parent: obj.parent,
        })
    }
}

/// Stable ascending sort by session number
pub fn sort_by_session<P: SessionNumbered>(records: &mut [Record<P>]) {
    records.sort_by_key(|r| r.session_number());
}
