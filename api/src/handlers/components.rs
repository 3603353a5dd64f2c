//! Component handlers
//!
//! Endpoints for drafting, previewing and publishing component schemas.
//! The preview endpoint supports content negotiation: Accept: application/json
//! for JSON, otherwise Markdown.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::app::component_service::unwrap_component;
use crate::error::AppError;
use crate::handlers::extract::{ApiJson, ApiQuery};
use crate::preview::{build_preview, render_preview};
use crate::AppState;

/// Check if the client wants JSON response
fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false)
}

/// Request body for POST /api/generate-component
#[derive(Debug, Deserialize)]
pub struct GenerateComponentRequest {
    #[serde(default)]
    pub prompt: String,
    pub model: Option<String>,
}

/// Request body for POST /api/create-storyblok-component
#[derive(Debug, Deserialize)]
pub struct CreateComponentRequest {
    #[serde(default)]
    pub component: Value,
    pub space_id: Option<String>,
    pub access_token: Option<String>,
}

/// Query parameters for GET /api/get-storyblok-components
#[derive(Debug, Default, Deserialize)]
pub struct ListComponentsQuery {
    pub space_id: Option<String>,
    pub access_token: Option<String>,
}

/// Request body for POST /api/preview-component
#[derive(Debug, Deserialize)]
pub struct PreviewComponentRequest {
    #[serde(default)]
    pub component: Value,
}

#[derive(Debug, Serialize)]
pub struct CreateComponentResponse {
    pub message: &'static str,
    pub component: Value,
}

#[derive(Debug, Serialize)]
pub struct ListComponentsResponse {
    pub message: &'static str,
    pub components: Vec<Value>,
}

/// POST /api/generate-component
///
/// Draft a component schema from a free-text description. Returns the parsed
/// model output, normally a `{"component": {...}}` create request body.
pub async fn generate_component(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<GenerateComponentRequest>,
) -> Result<Json<Value>, AppError> {
    let component = state
        .component_service
        .generate(&body.prompt, body.model.as_deref())
        .await?;

    Ok(Json(component))
}

/// POST /api/create-storyblok-component
///
/// Create a component in the Storyblok space. The schema is checked before
/// the space and token.
pub async fn create_component(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateComponentRequest>,
) -> Result<Json<CreateComponentResponse>, AppError> {
    let component = unwrap_component(body.component)?;
    let target = state
        .spaces
        .resolve(body.space_id.as_deref(), body.access_token.as_deref())?;

    let component = state.component_service.publish(&target, component).await?;

    Ok(Json(CreateComponentResponse {
        message: "Component created successfully!",
        component,
    }))
}

/// GET /api/get-storyblok-components
///
/// List the components defined in the Storyblok space.
pub async fn list_components(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListComponentsQuery>,
) -> Result<Json<ListComponentsResponse>, AppError> {
    let target = state
        .spaces
        .resolve(query.space_id.as_deref(), query.access_token.as_deref())?;

    let components = state.component_service.list(&target).await?;

    Ok(Json(ListComponentsResponse {
        message: "Components fetched successfully!",
        components,
    }))
}

/// POST /api/preview-component
///
/// Describe the editor form a component schema produces.
/// - Accept: application/json → JSON response
/// - Otherwise → Markdown
pub async fn preview_component(
    headers: HeaderMap,
    ApiJson(body): ApiJson<PreviewComponentRequest>,
) -> Result<Response, AppError> {
    let preview = build_preview(&body.component)?;

    if wants_json(&headers) {
        Ok(Json(preview).into_response())
    } else {
        Ok((
            [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
            render_preview(&preview),
        )
            .into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn parse_generate_request_minimal() {
        let request: GenerateComponentRequest =
            serde_json::from_str(r#"{"prompt": "A hero banner"}"#).unwrap();
        assert_eq!(request.prompt, "A hero banner");
        assert!(request.model.is_none());
    }

    #[test]
    fn parse_generate_request_missing_prompt() {
        let request: GenerateComponentRequest = serde_json::from_str("{}").unwrap();
        assert!(request.prompt.is_empty());
    }

    #[test]
    fn parse_create_request_with_target() {
        let json = r#"{
            "component": {"name": "hero"},
            "space_id": "123",
            "access_token": "abc"
        }"#;
        let request: CreateComponentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.component["name"], "hero");
        assert_eq!(request.space_id.as_deref(), Some("123"));
        assert_eq!(request.access_token.as_deref(), Some("abc"));
    }

    #[test]
    fn parse_create_request_without_component() {
        let request: CreateComponentRequest = serde_json::from_str("{}").unwrap();
        assert!(request.component.is_null());
        assert!(request.space_id.is_none());
    }

    #[test]
    fn list_response_shape() {
        let json = serde_json::to_value(ListComponentsResponse {
            message: "Components fetched successfully!",
            components: vec![serde_json::json!({ "name": "teaser" })],
        })
        .unwrap();
        assert_eq!(json["message"], "Components fetched successfully!");
        assert_eq!(json["components"][0]["name"], "teaser");
    }

    #[test]
    fn wants_json_reads_accept_header() {
        let mut headers = HeaderMap::new();
        assert!(!wants_json(&headers));

        headers.insert(header::ACCEPT, HeaderValue::from_static("text/markdown"));
        assert!(!wants_json(&headers));

        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/json, text/plain"),
        );
        assert!(wants_json(&headers));
    }
}
