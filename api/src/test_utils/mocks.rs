//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They record every call so tests can verify what was sent.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use crate::domain::entities::SpaceTarget;
use crate::domain::ports::{StoryblokClient, TextGenerator};
use crate::error::{GenAiError, StoryblokError};

// ============================================================================
// Mock Text Generator
// ============================================================================

/// Replays queued responses in order; an empty queue yields `EmptyResponse`
#[derive(Default)]
pub struct MockTextGenerator {
    responses: Arc<RwLock<VecDeque<Result<String, GenAiError>>>>,
    calls: Arc<RwLock<Vec<(String, String)>>>,
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(text: &str) -> Self {
        Self::new().then_respond(text)
    }

    pub fn failing(error: GenAiError) -> Self {
        let mock = Self::new();
        mock.responses.write().unwrap().push_back(Err(error));
        mock
    }

    /// Queue another successful response
    pub fn then_respond(self, text: &str) -> Self {
        self.responses
            .write()
            .unwrap()
            .push_back(Ok(text.to_string()));
        self
    }

    /// Every `(model, prompt)` pair received so far
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, GenAiError> {
        self.calls
            .write()
            .unwrap()
            .push((model.to_string(), prompt.to_string()));

        self.responses
            .write()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GenAiError::EmptyResponse))
    }
}

// ============================================================================
// Mock Storyblok Client
// ============================================================================

#[derive(Default)]
pub struct MockStoryblokClient {
    components: Arc<RwLock<Vec<Value>>>,
    created_components: Arc<RwLock<Vec<(String, Value)>>>,
    created_stories: Arc<RwLock<Vec<(String, Value)>>>,
    targets: Arc<RwLock<Vec<SpaceTarget>>>,
    failure: Arc<RwLock<Option<StoryblokError>>>,
    next_id: Arc<RwLock<u64>>,
}

impl MockStoryblokClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the space with a component
    pub fn with_component(self, component: Value) -> Self {
        self.components.write().unwrap().push(component);
        self
    }

    /// Fail the next call with the given error
    pub fn with_failure(self, error: StoryblokError) -> Self {
        *self.failure.write().unwrap() = Some(error);
        self
    }

    pub fn created_components(&self) -> Vec<(String, Value)> {
        self.created_components.read().unwrap().clone()
    }

    pub fn created_stories(&self) -> Vec<(String, Value)> {
        self.created_stories.read().unwrap().clone()
    }

    /// Space targets of every call, in order
    pub fn targets(&self) -> Vec<SpaceTarget> {
        self.targets.read().unwrap().clone()
    }

    fn begin(&self, target: &SpaceTarget) -> Result<(), StoryblokError> {
        self.targets.write().unwrap().push(target.clone());
        match self.failure.write().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn assign_id(&self, value: &Value) -> Value {
        let mut next_id = self.next_id.write().unwrap();
        *next_id += 1;

        let mut value = value.clone();
        if let Value::Object(map) = &mut value {
            map.insert("id".to_string(), json!(*next_id));
        }
        value
    }
}

#[async_trait]
impl StoryblokClient for MockStoryblokClient {
    async fn create_component(
        &self,
        target: &SpaceTarget,
        component: &Value,
    ) -> Result<Value, StoryblokError> {
        self.begin(target)?;

        self.created_components
            .write()
            .unwrap()
            .push((target.space_id.clone(), component.clone()));

        let created = self.assign_id(component);
        self.components.write().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_components(&self, target: &SpaceTarget) -> Result<Vec<Value>, StoryblokError> {
        self.begin(target)?;
        Ok(self.components.read().unwrap().clone())
    }

    async fn create_story(
        &self,
        target: &SpaceTarget,
        payload: &Value,
    ) -> Result<Value, StoryblokError> {
        self.begin(target)?;

        self.created_stories
            .write()
            .unwrap()
            .push((target.space_id.clone(), payload.clone()));

        let story = payload.get("story").unwrap_or(payload);
        Ok(self.assign_id(story))
    }
}
