//! BlokPilot API Server
//!
//! Drafts Storyblok components and stories with Gemini and publishes them
//! through the Storyblok Management API.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod handlers;
mod preview;

#[cfg(test)]
mod test_utils;


use adapters::{GeminiClientImpl, StoryblokClientImpl};
use app::{ComponentService, ReportService, SpaceDefaults, StoryService};
use config::Config;
use domain::ports::{StoryblokClient, TextGenerator};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub component_service: Arc<ComponentService<dyn TextGenerator, dyn StoryblokClient>>,
    pub story_service: Arc<StoryService<dyn TextGenerator, dyn StoryblokClient>>,
    pub report_service: Arc<ReportService<dyn TextGenerator>>,
    pub spaces: SpaceDefaults,
}

impl AppState {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        storyblok: Arc<dyn StoryblokClient>,
        default_model: String,
        spaces: SpaceDefaults,
    ) -> Self {
        Self {
            component_service: Arc::new(ComponentService::new(
                generator.clone(),
                storyblok.clone(),
                default_model.clone(),
            )),
            story_service: Arc::new(StoryService::new(
                generator.clone(),
                storyblok,
                default_model.clone(),
            )),
            report_service: Arc::new(ReportService::new(generator, default_model)),
            spaces,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// All routes with CORS and tracing; rate limiting is added in `main`
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/generate-component",
            post(handlers::generate_component),
        )
        .route(
            "/api/create-storyblok-component",
            post(handlers::create_component),
        )
        .route(
            "/api/get-storyblok-components",
            get(handlers::list_components),
        )
        .route(
            "/api/generate-story-content",
            post(handlers::generate_story),
        )
        .route("/api/publish-story", post(handlers::publish_story))
        .route(
            "/api/generate-accessibility-report",
            post(handlers::accessibility_report),
        )
        .route("/api/preview-component", post(handlers::preview_component))
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,blokpilot_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting BlokPilot API...");

    // Load configuration
    let config = Config::from_env();
    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; generation endpoints will fail");
    }

    let timeout = Duration::from_secs(config.http_timeout_secs);

    // Create adapters
    let generator: Arc<dyn TextGenerator> = Arc::new(
        GeminiClientImpl::new(
            config.gemini_api_url.clone(),
            config.gemini_api_key.clone(),
            timeout,
        )
        .context("Failed to build Gemini client")?,
    );
    let storyblok: Arc<dyn StoryblokClient> = Arc::new(
        StoryblokClientImpl::new(config.storyblok_mapi_url.clone(), timeout)
            .context("Failed to build Storyblok client")?,
    );

    // Create app state
    let state = AppState::new(
        generator,
        storyblok,
        config.gemini_model.clone(),
        SpaceDefaults::new(
            config.storyblok_space_id.clone(),
            config.storyblok_access_token.clone(),
        ),
    );

    // Uses PeerIpKeyExtractor to get client IP from socket connection
    // (SmartIpKeyExtractor requires X-Forwarded-For headers from reverse proxy)
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(config.rate_limit_per_second)
            .burst_size(config.rate_limit_burst)
            .finish()
            .context("Invalid rate limit configuration")?,
    );

    let app = build_router(state).layer(GovernorLayer {
        config: governor_config,
    });

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(model = %config.gemini_model, "Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
