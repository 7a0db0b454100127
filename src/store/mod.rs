//! Record repository boundary: typed content records kept in the remote object store

use crate::error::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A record type as registered in the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectType {
    pub id: String,

    pub name: String,

    /// JSON Schema the store enforces for this type's properties
    #[serde(default)]
    pub object_schema: Option<Value>,
}

/// A stored record with untyped properties, as it travels on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentObject {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub properties: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// Equality filter on the record type and the campaign id property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub type_id: String,
    pub campaign_id: String,
}

impl Query {
    pub fn campaign(type_id: &str, campaign_id: &str) -> Self {
        Self {
            type_id: type_id.to_string(),
            campaign_id: campaign_id.to_string(),
        }
    }

    /// Filter document understood by the store's find endpoint
    pub fn to_filter(&self) -> Value {
        serde_json::json!({
            "type": self.type_id,
            "properties.campaignId": self.campaign_id,
        })
    }
}

/// Payload for creating a record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateObject {
    #[serde(rename = "type")]
    pub type_id: String,

    pub properties: Value,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Look up a record type by its human-readable name
    async fn resolve_type(&self, name: &str) -> Result<Option<ObjectType>, StoreError>;

    /// All records of the query's type whose properties carry the campaign id
    async fn find(&self, query: &Query) -> Result<Vec<ContentObject>, StoreError>;

    async fn create(&self, object: CreateObject) -> Result<ContentObject, StoreError>;
}
