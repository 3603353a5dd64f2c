//! Unified error types for the BlokPilot API
//!
//! This module defines error types for each layer:
//! - `GenAiError`: Gemini text-generation client errors
//! - `StoryblokError`: Storyblok Management API client errors
//! - `ExtractError`: failures turning model output into JSON
//! - `AppError`: Application layer errors (wraps the others for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Gemini API client errors
#[derive(Debug, Error)]
pub enum GenAiError {
    #[error("Gemini API key is missing")]
    NotConfigured,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Gemini API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Response blocked by safety filters")]
    ContentFiltered,

    #[error("No text in response")]
    EmptyResponse,

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Storyblok Management API client errors
#[derive(Debug, Error)]
pub enum StoryblokError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Unauthorized - invalid token")]
    Unauthorized,

    #[error("Rate limited")]
    RateLimited,

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Model output could not be turned into structured data
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Model output is not valid JSON: {reason}")]
    InvalidJson { reason: String, raw: String },
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Gemini error: {0}")]
    GenAi(#[from] GenAiError),

    #[error("Storyblok error: {0}")]
    Storyblok(#[from] StoryblokError),

    #[error("{0}")]
    Extract(#[from] ExtractError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body for JSON responses
#[derive(Debug, Serialize)]
struct ErrorResponse {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_response: Option<String>,
}

impl ErrorResponse {
    fn new(message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            message: message.into(),
            details,
            raw_response: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg, None)),
            AppError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new(format!("Unauthorized: {}", msg), None),
            ),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Internal server error", None),
                )
            }
            AppError::Extract(ExtractError::InvalidJson { reason, raw }) => {
                tracing::error!("Failed to parse Gemini response as JSON: {}", reason);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        message: "Gemini generated invalid JSON. Please try again or refine your prompt."
                            .to_string(),
                        details: Some(reason.clone()),
                        raw_response: Some(raw.clone()),
                    },
                )
            }
            AppError::GenAi(e) => {
                tracing::error!("Gemini error: {}", e);
                match e {
                    GenAiError::NotConfigured => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorResponse::new(
                            "Server configuration error: Gemini API key is missing.",
                            None,
                        ),
                    ),
                    GenAiError::RateLimited => (
                        StatusCode::TOO_MANY_REQUESTS,
                        ErrorResponse::new("Gemini rate limit reached. Try again shortly.", None),
                    ),
                    _ => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorResponse::new("Failed to generate content.", Some(e.to_string())),
                    ),
                }
            }
            AppError::Storyblok(e) => {
                tracing::error!("Storyblok error: {}", e);
                match e {
                    StoryblokError::Unauthorized => (
                        StatusCode::UNAUTHORIZED,
                        ErrorResponse::new("Storyblok rejected the access token.", None),
                    ),
                    StoryblokError::RateLimited => (
                        StatusCode::TOO_MANY_REQUESTS,
                        ErrorResponse::new("Storyblok rate limit reached. Try again shortly.", None),
                    ),
                    StoryblokError::Api { status, message } => {
                        // Client-side MAPI errors keep their status so the editor can act on them
                        let http_status = match *status {
                            403 => StatusCode::FORBIDDEN,
                            404 => StatusCode::NOT_FOUND,
                            422 => StatusCode::UNPROCESSABLE_ENTITY,
                            _ => StatusCode::BAD_GATEWAY,
                        };
                        (
                            http_status,
                            ErrorResponse::new(
                                "Storyblok request failed.",
                                Some(message.clone()),
                            ),
                        )
                    }
                    StoryblokError::Request(_) | StoryblokError::Deserialization(_) => (
                        StatusCode::BAD_GATEWAY,
                        ErrorResponse::new("Storyblok request failed.", Some(e.to_string())),
                    ),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}
