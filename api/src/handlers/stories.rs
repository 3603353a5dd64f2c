//! Story handlers
//!
//! Endpoints for drafting and publishing stories.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::app::story_service::wrap_story;
use crate::error::AppError;
use crate::handlers::extract::ApiJson;
use crate::AppState;

/// Request body for POST /api/generate-story-content
#[derive(Debug, Deserialize)]
pub struct GenerateStoryRequest {
    #[serde(default)]
    pub story_prompt: String,
    /// Components the story may use; kept loose so a non-array gets a 400, not a 422
    #[serde(default)]
    pub selected_components: Option<Value>,
    pub model: Option<String>,
}

/// Request body for POST /api/publish-story
#[derive(Debug, Deserialize)]
pub struct PublishStoryRequest {
    #[serde(default)]
    pub story_content: Value,
    pub space_id: Option<String>,
    pub access_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateStoryResponse {
    pub message: &'static str,
    pub story_content: Value,
}

#[derive(Debug, Serialize)]
pub struct PublishStoryResponse {
    pub message: &'static str,
    pub story: Value,
}

/// POST /api/generate-story-content
///
/// Draft a story payload that uses the selected components. The prompt is
/// checked before the component list.
pub async fn generate_story(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<GenerateStoryRequest>,
) -> Result<Json<GenerateStoryResponse>, AppError> {
    if body.story_prompt.trim().is_empty() {
        return Err(AppError::BadRequest("Story prompt is required.".to_string()));
    }

    let components = match body.selected_components {
        Some(Value::Array(items)) => items,
        _ => {
            return Err(AppError::BadRequest(
                "Selected components are required and must be an array.".to_string(),
            ))
        }
    };

    let story_content = state
        .story_service
        .generate(&body.story_prompt, &components, body.model.as_deref())
        .await?;

    Ok(Json(GenerateStoryResponse {
        message: "Story content generated successfully!",
        story_content,
    }))
}

/// POST /api/publish-story
///
/// Create the story in the Storyblok space. The content is checked before
/// the space and token.
pub async fn publish_story(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<PublishStoryRequest>,
) -> Result<Json<PublishStoryResponse>, AppError> {
    let payload = wrap_story(body.story_content)?;
    let target = state
        .spaces
        .resolve(body.space_id.as_deref(), body.access_token.as_deref())?;

    let story = state.story_service.publish(&target, payload).await?;

    Ok(Json(PublishStoryResponse {
        message: "Story published successfully!",
        story,
    }))
}
