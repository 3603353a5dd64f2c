//! Storyblok client port trait
//!
//! Defines the interface for the Storyblok Management API.
//! Component and story bodies are opaque JSON owned by Storyblok.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::entities::SpaceTarget;
use crate::error::StoryblokError;

/// Storyblok Management API operations used by the assistant
#[async_trait]
pub trait StoryblokClient: Send + Sync {
    /// Create a component in the space. Returns the created component object.
    async fn create_component(
        &self,
        target: &SpaceTarget,
        component: &Value,
    ) -> Result<Value, StoryblokError>;

    /// List all components defined in the space
    async fn list_components(&self, target: &SpaceTarget) -> Result<Vec<Value>, StoryblokError>;

    /// Create a story from a `{"story": {...}}` payload. Returns the created story object.
    async fn create_story(
        &self,
        target: &SpaceTarget,
        payload: &Value,
    ) -> Result<Value, StoryblokError>;
}
