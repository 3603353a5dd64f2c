//! HTTP client for the BlokPilot API
//!
//! The API holds the Gemini key; this client only forwards editor requests and
//! the Storyblok token and space from the local settings.

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;

use crate::settings::Settings;

/// HTTP client for communicating with the BlokPilot API
#[derive(Clone)]
pub struct ProxyClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProxyClient {
    /// Create a new client from environment variables
    ///
    /// - BLOKPILOT_API_URL: Base URL of the API (default http://localhost:8080)
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("BLOKPILOT_API_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        Self::new(&base_url)
    }

    /// Create a new client with explicit configuration
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Draft a component schema from a description
    pub async fn generate_component(&self, prompt: &str, model: Option<&str>) -> Result<Value> {
        self.post_json(
            "/api/generate-component",
            &GenerateComponentRequest { prompt, model },
        )
        .await
    }

    /// Markdown preview of a component's editor form
    pub async fn preview_component(&self, component: &Value) -> Result<String> {
        let url = format!("{}/api/preview-component", self.base_url);
        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "text/markdown")
            .json(&ComponentBody { component })
            .send()
            .await
            .context("Failed to POST /api/preview-component")?;

        handle_text_response(response).await
    }

    /// Create a component in the configured space
    pub async fn create_component(&self, component: &Value, settings: &Settings) -> Result<Value> {
        self.post_json(
            "/api/create-storyblok-component",
            &CreateComponentRequest {
                component,
                space_id: settings.space_id.as_deref(),
                access_token: settings.access_token.as_deref(),
            },
        )
        .await
    }

    /// List the components of the configured space
    pub async fn list_components(&self, settings: &Settings) -> Result<Vec<Value>> {
        let mut query = Vec::new();
        if let Some(space_id) = &settings.space_id {
            query.push(("space_id", space_id.as_str()));
        }
        if let Some(token) = &settings.access_token {
            query.push(("access_token", token.as_str()));
        }

        let url = format!("{}/api/get-storyblok-components", self.base_url);
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(&query)
            .send()
            .await
            .context("Failed to GET /api/get-storyblok-components")?;

        let mut body = handle_json_response(response).await?;
        match body.get_mut("components").map(Value::take) {
            Some(Value::Array(components)) => Ok(components),
            _ => anyhow::bail!("API response is missing the components list"),
        }
    }

    /// Draft a story that uses the given components
    pub async fn generate_story(
        &self,
        story_prompt: &str,
        components: &[Value],
        model: Option<&str>,
    ) -> Result<Value> {
        let mut body = self
            .post_json(
                "/api/generate-story-content",
                &GenerateStoryRequest {
                    story_prompt,
                    selected_components: components,
                    model,
                },
            )
            .await?;
        Ok(body
            .get_mut("story_content")
            .map(Value::take)
            .unwrap_or(Value::Null))
    }

    /// Publish a story to the configured space
    pub async fn publish_story(&self, story_content: &Value, settings: &Settings) -> Result<Value> {
        self.post_json(
            "/api/publish-story",
            &PublishStoryRequest {
                story_content,
                space_id: settings.space_id.as_deref(),
                access_token: settings.access_token.as_deref(),
            },
        )
        .await
    }

    /// Markdown accessibility report for a story
    pub async fn accessibility_report(
        &self,
        story_content: &Value,
        model: Option<&str>,
    ) -> Result<String> {
        let body = self
            .post_json(
                "/api/generate-accessibility-report",
                &ReportRequest {
                    story_content,
                    model,
                },
            )
            .await?;

        body.get("report")
            .and_then(Value::as_str)
            .map(str::to_string)
            .context("API response is missing the report")
    }

    // --- Internal helpers ---

    async fn post_json<T: Serialize>(&self, path: &str, body: &T) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to POST {}", path))?;

        handle_json_response(response).await
    }
}

async fn handle_json_response(response: reqwest::Response) -> Result<Value> {
    let body = handle_text_response(response).await?;
    serde_json::from_str(&body).context("API returned invalid JSON")
}

async fn handle_text_response(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .context("Failed to read response body")?;

    if !status.is_success() {
        anyhow::bail!("API error ({}): {}", status.as_u16(), error_message(&body));
    }

    Ok(body)
}

/// Longest slice of a raw model response quoted in an error
const RAW_RESPONSE_LIMIT: usize = 500;

/// The API's `message` (plus `details` and any raw model output) when the body
/// is an error object, else the raw body
fn error_message(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let field = |key| string_field(parsed.as_ref(), key);

    let Some(message) = field("message") else {
        return if body.trim().is_empty() {
            "no response body".to_string()
        } else {
            body.trim().to_string()
        };
    };

    let mut text = match field("details") {
        Some(details) => format!("{} ({})", message, details),
        None => message.to_string(),
    };
    if let Some(raw) = field("raw_response") {
        text.push_str("\nRaw model output:\n");
        text.push_str(&truncate(raw.trim(), RAW_RESPONSE_LIMIT));
    }
    text
}

fn string_field<'a>(body: Option<&'a Value>, key: &str) -> Option<&'a str> {
    body.and_then(|v| v.get(key))
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

// --- Request Types ---

#[derive(Debug, Serialize)]
struct GenerateComponentRequest<'a> {
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ComponentBody<'a> {
    component: &'a Value,
}

#[derive(Debug, Serialize)]
struct CreateComponentRequest<'a> {
    component: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    space_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct GenerateStoryRequest<'a> {
    story_prompt: &'a str,
    selected_components: &'a [Value],
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct PublishStoryRequest<'a> {
    story_content: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    space_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ReportRequest<'a> {
    story_content: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}
