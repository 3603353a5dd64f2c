//! Storyblok Management API client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use urlencoding::encode;

use crate::domain::entities::SpaceTarget;
use crate::domain::ports::StoryblokClient;
use crate::error::StoryblokError;

/// Implementation of the Storyblok Management API client
pub struct StoryblokClientImpl {
    http: Client,
    base_url: String,
}

impl StoryblokClientImpl {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, StoryblokError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn space_url(&self, space_id: &str, path: &str) -> String {
        format!("{}/spaces/{}{}", self.base_url, encode(space_id.trim()), path)
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
        action: &str,
    ) -> Result<T, StoryblokError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| StoryblokError::Deserialization(e.to_string()))
        } else if status.as_u16() == 401 {
            Err(StoryblokError::Unauthorized)
        } else if status.as_u16() == 429 {
            Err(StoryblokError::RateLimited)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(StoryblokError::Api {
                status: status.as_u16(),
                message: error_message(&body, action, status.as_u16()),
            })
        }
    }
}

/// Personal access tokens go in as-is; OAuth tokens already carry `Bearer `
fn authorization_value(token: &str) -> String {
    token.trim().to_string()
}

/// Best human-readable message from a MAPI error body
fn error_message(body: &str, action: &str, status: u16) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            match value.get(key) {
                Some(Value::String(s)) if !s.is_empty() => return s.clone(),
                Some(Value::String(_)) | Some(Value::Null) | None => {}
                Some(other) => return other.to_string(),
            }
        }
        // Validation failures come back as {"field": ["problem", ...]}
        if let Value::Object(map) = &value {
            let problems: Vec<String> = map
                .iter()
                .filter_map(|(field, v)| match v {
                    Value::Array(items) => Some(format!(
                        "{} {}",
                        field,
                        items
                            .iter()
                            .filter_map(Value::as_str)
                            .collect::<Vec<_>>()
                            .join(", ")
                    )),
                    _ => None,
                })
                .collect();
            if !problems.is_empty() {
                return problems.join("; ");
            }
        }
    }

    let body = body.trim();
    if body.is_empty() {
        format!("{} failed with status {}", action, status)
    } else {
        body.to_string()
    }
}

/// Request types for the Management API
#[derive(Serialize)]
struct CreateComponentRequest<'a> {
    component: &'a Value,
}

/// Response types from the Management API
#[derive(Deserialize)]
struct ComponentResponse {
    component: Value,
}

#[derive(Deserialize)]
struct ComponentsResponse {
    #[serde(default)]
    components: Vec<Value>,
}

#[derive(Deserialize)]
struct StoryResponse {
    story: Value,
}

#[async_trait]
impl StoryblokClient for StoryblokClientImpl {
    async fn create_component(
        &self,
        target: &SpaceTarget,
        component: &Value,
    ) -> Result<Value, StoryblokError> {
        tracing::debug!(space_id = %target.space_id, "Creating Storyblok component");

        let resp = self
            .http
            .post(self.space_url(&target.space_id, "/components/"))
            .header("Authorization", authorization_value(&target.access_token))
            .json(&CreateComponentRequest { component })
            .send()
            .await?;

        let created: ComponentResponse = self.handle_response(resp, "Create component").await?;
        Ok(created.component)
    }

    async fn list_components(&self, target: &SpaceTarget) -> Result<Vec<Value>, StoryblokError> {
        tracing::debug!(space_id = %target.space_id, "Listing Storyblok components");

        let resp = self
            .http
            .get(self.space_url(&target.space_id, "/components/"))
            .header("Authorization", authorization_value(&target.access_token))
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let listed: ComponentsResponse = self.handle_response(resp, "List components").await?;
        Ok(listed.components)
    }

    async fn create_story(
        &self,
        target: &SpaceTarget,
        payload: &Value,
    ) -> Result<Value, StoryblokError> {
        tracing::debug!(space_id = %target.space_id, "Creating Storyblok story");

        let resp = self
            .http
            .post(self.space_url(&target.space_id, "/stories/"))
            .header("Authorization", authorization_value(&target.access_token))
            .json(payload)
            .send()
            .await?;

        let created: StoryResponse = self.handle_response(resp, "Create story").await?;
        Ok(created.story)
    }
}
