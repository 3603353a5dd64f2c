//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod components;
pub mod extract;
pub mod reports;
pub mod stories;

pub use components::{create_component, generate_component, list_components, preview_component};
pub use reports::accessibility_report;
pub use stories::{generate_story, publish_story};
