//! HTTP client for the studio (types, interactions) and the object store.
//!
//! One authenticated client backs both the `RecordStore` and the
//! `ContentGenerator` boundaries. It is built once per command by
//! [`StudioClient::connect`] and handed to the campaign context explicitly.

use crate::config::ConnectionConfig;
use crate::error::{GeneratorError, StoreError};
use crate::generator::{ContentGenerator, ExecutionRequest, ExecutionResult};
use crate::store::{ContentObject, CreateObject, ObjectType, Query, RecordStore};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const PROJECT_HEADER: &str = "x-project-id";

pub struct StudioClient {
    http: Client,
    studio_url: String,
    store_url: String,
    token: Option<String>,
    project_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

impl StudioClient {
    /// Build the client and exchange the API key (if any) for a bearer token
    pub async fn connect(conn: &ConnectionConfig) -> Result<Self, StoreError> {
        let studio_url = conn
            .studio_url
            .as_deref()
            .ok_or_else(|| StoreError::Auth("studio_url is not configured".to_string()))?;
        let store_url = conn
            .store_url
            .as_deref()
            .ok_or_else(|| StoreError::Auth("store_url is not configured".to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(conn.timeout_sec))
            .build()?;

        let mut client = Self {
            http,
            studio_url: studio_url.trim_end_matches('/').to_string(),
            store_url: store_url.trim_end_matches('/').to_string(),
            token: None,
            project_id: conn.project_id.clone(),
        };

        if let Some(api_key) = conn.api_key.as_deref().filter(|k| !k.is_empty()) {
            client.token = Some(client.exchange_key(api_key).await?);
            debug!("Exchanged API key for access token");
        }

        Ok(client)
    }

    async fn exchange_key(&self, api_key: &str) -> Result<String, StoreError> {
        let resp = self
            .http
            .post(format!("{}/auth/token", self.studio_url))
            .bearer_auth(api_key)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Auth(format!("{}: {}", status, body)));
        }

        let token: TokenResponse = resp.json().await?;
        Ok(token.token)
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        let mut req = self.http.request(method, url);
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }
        if let Some(ref project) = self.project_id {
            req = req.header(PROJECT_HEADER, project);
        }
        req
    }
}

/// Split a non-2xx response into its status and body
async fn api_failure(resp: Response) -> Result<Response, (u16, String)> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp.text().await.unwrap_or_default();
    Err((status.as_u16(), message))
}

#[async_trait]
impl RecordStore for StudioClient {
    async fn resolve_type(&self, name: &str) -> Result<Option<ObjectType>, StoreError> {
        debug!(%name, "resolve_type: called");
        let url = format!(
            "{}/api/v1/types/by-name/{}",
            self.studio_url,
            urlencoding::encode(name)
        );

        let resp = self.request(Method::GET, url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = api_failure(resp)
            .await
            .map_err(|(status, message)| StoreError::Api { status, message })?;

        Ok(Some(resp.json().await?))
    }

    async fn find(&self, query: &Query) -> Result<Vec<ContentObject>, StoreError> {
        debug!(type_id = %query.type_id, campaign_id = %query.campaign_id, "find: called");
        let body = serde_json::json!({ "query": query.to_filter() });
        let resp = self
            .request(Method::POST, format!("{}/api/v1/objects/find", self.store_url))
            .json(&body)
            .send()
            .await?;
        let resp = api_failure(resp)
            .await
            .map_err(|(status, message)| StoreError::Api { status, message })?;

        Ok(resp.json().await?)
    }

    async fn create(&self, object: CreateObject) -> Result<ContentObject, StoreError> {
        debug!(name = %object.name, "create: called");
        let resp = self
            .request(Method::POST, format!("{}/api/v1/objects", self.store_url))
            .json(&object)
            .send()
            .await?;
        let resp = api_failure(resp)
            .await
            .map_err(|(status, message)| StoreError::Api { status, message })?;

        Ok(resp.json().await?)
    }
}

#[async_trait]
impl ContentGenerator for StudioClient {
    async fn execute(
        &self,
        interaction: &str,
        request: &ExecutionRequest,
    ) -> Result<ExecutionResult, GeneratorError> {
        debug!(%interaction, "execute: called");
        let resp = self
            .request(
                Method::POST,
                format!(
                    "{}/api/v1/execute/{}",
                    self.studio_url,
                    urlencoding::encode(interaction)
                ),
            )
            .json(request)
            .send()
            .await?;
        let resp = api_failure(resp)
            .await
            .map_err(|(status, message)| GeneratorError::Api { status, message })?;

        Ok(resp.json().await?)
    }
}
