//! Story service
//!
//! Drafts story payloads from a prompt and the space's components, and
//! publishes them to Storyblok.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::app::component_service::resolve_model;
use crate::app::output_parser::parse_json_output;
use crate::app::prompts::story_prompt;
use crate::domain::entities::SpaceTarget;
use crate::domain::ports::{StoryblokClient, TextGenerator};
use crate::error::AppError;

/// Service for generating and publishing stories
pub struct StoryService<G, S>
where
    G: TextGenerator + ?Sized,
    S: StoryblokClient + ?Sized,
{
    generator: Arc<G>,
    storyblok: Arc<S>,
    default_model: String,
}

impl<G, S> StoryService<G, S>
where
    G: TextGenerator + ?Sized,
    S: StoryblokClient + ?Sized,
{
    pub fn new(generator: Arc<G>, storyblok: Arc<S>, default_model: String) -> Self {
        Self {
            generator,
            storyblok,
            default_model,
        }
    }

    /// Ask the model for a story payload built from the given components
    pub async fn generate(
        &self,
        prompt: &str,
        components: &[Value],
        model: Option<&str>,
    ) -> Result<Value, AppError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(AppError::BadRequest("Story prompt is required.".to_string()));
        }

        let available = serde_json::to_string_pretty(&component_summaries(components))
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let model = resolve_model(model, &self.default_model);
        let text = self
            .generator
            .generate(model, &story_prompt(prompt, &available))
            .await?;

        let mut story = parse_json_output(&text)?;
        let assigned = ensure_block_uids(&mut story);

        tracing::info!(
            model = %model,
            components = components.len(),
            assigned_uids = assigned,
            "Generated story content"
        );
        Ok(story)
    }

    /// Create the story in the target space
    pub async fn publish(&self, target: &SpaceTarget, payload: Value) -> Result<Value, AppError> {
        let payload = wrap_story(payload)?;
        let story = self.storyblok.create_story(target, &payload).await?;
        let name = story_name(&story);

        tracing::info!(
            space_id = %target.space_id,
            name = %name,
            "Published Storyblok story"
        );
        Ok(story)
    }
}

/// The part of each component the model needs: its name and field schema
pub fn component_summaries(components: &[Value]) -> Vec<Value> {
    components
        .iter()
        .map(|c| {
            json!({
                "name": c.get("name").cloned().unwrap_or(Value::Null),
                "schema": c.get("schema").cloned().unwrap_or(Value::Null),
            })
        })
        .collect()
}

/// Accept `{"story": {...}}` or a bare story object
pub fn wrap_story(payload: Value) -> Result<Value, AppError> {
    match payload {
        Value::Object(map) if map.contains_key("story") => Ok(Value::Object(map)),
        Value::Object(map) if !map.is_empty() => {
            let mut wrapped = Map::new();
            wrapped.insert("story".to_string(), Value::Object(map));
            Ok(Value::Object(wrapped))
        }
        _ => Err(AppError::BadRequest("Story content is required.".to_string())),
    }
}

fn story_name(story: &Value) -> &str {
    story
        .get("name")
        .or_else(|| story.get("story").and_then(|s| s.get("name")))
        .and_then(Value::as_str)
        .unwrap_or("<unnamed>")
}

/// Give every block a unique `_uid`.
///
/// A block is any object with a string `component` key. Missing, empty and
/// duplicated uids are replaced with fresh UUIDs. Returns how many were assigned.
pub fn ensure_block_uids(value: &mut Value) -> usize {
    let mut seen = HashSet::new();
    assign_uids(value, &mut seen)
}

fn assign_uids(value: &mut Value, seen: &mut HashSet<String>) -> usize {
    match value {
        Value::Object(map) => {
            let mut assigned = 0;
            if map.get("component").map(Value::is_string).unwrap_or(false) {
                let existing = map
                    .get("_uid")
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|uid| !uid.is_empty())
                    .map(str::to_string);

                match existing {
                    Some(uid) if seen.insert(uid.clone()) => {}
                    _ => {
                        let uid = Uuid::new_v4().to_string();
                        seen.insert(uid.clone());
                        map.insert("_uid".to_string(), Value::String(uid));
                        assigned += 1;
                    }
                }
            }
            for child in map.values_mut() {
                assigned += assign_uids(child, seen);
            }
            assigned
        }
        Value::Array(items) => items.iter_mut().map(|item| assign_uids(item, seen)).sum(),
        _ => 0,
    }
}
