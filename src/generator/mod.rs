//! Interaction executor boundary: runs named generation interactions

use crate::error::GeneratorError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-call model/environment override
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExecutionConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionRequest {
    pub data: Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_schema: Option<Value>,

    pub config: ExecutionConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecutionResult {
    #[serde(default)]
    pub result: Option<Value>,
}

impl ExecutionResult {
    #[allow(dead_code)]
    pub fn new(result: Value) -> Self {
        Self {
            result: Some(result),
        }
    }

    /// Deserialize the payload, treating a missing or null result as a failure
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, GeneratorError> {
        let value = self
            .result
            .filter(|v| !v.is_null())
            .ok_or(GeneratorError::EmptyResult)?;
        Ok(serde_json::from_value(value)?)
    }
}

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn execute(
        &self,
        interaction: &str,
        request: &ExecutionRequest,
    ) -> Result<ExecutionResult, GeneratorError>;
}
