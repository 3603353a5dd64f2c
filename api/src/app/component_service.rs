//! Component service
//!
//! Drafts Storyblok component schemas with Gemini and pushes them to a space.

use std::sync::Arc;

use serde_json::Value;

use crate::app::output_parser::parse_json_output;
use crate::app::prompts::component_prompt;
use crate::domain::entities::SpaceTarget;
use crate::domain::ports::{StoryblokClient, TextGenerator};
use crate::error::AppError;

/// Service for generating and publishing components
pub struct ComponentService<G, S>
where
    G: TextGenerator + ?Sized,
    S: StoryblokClient + ?Sized,
{
    generator: Arc<G>,
    storyblok: Arc<S>,
    default_model: String,
}

impl<G, S> ComponentService<G, S>
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

    /// Ask the model for a create-component request body and parse it
    pub async fn generate(&self, prompt: &str, model: Option<&str>) -> Result<Value, AppError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(AppError::BadRequest("Prompt is required.".to_string()));
        }

        let model = resolve_model(model, &self.default_model);
        let text = self
            .generator
            .generate(model, &component_prompt(prompt))
            .await?;

        let component = parse_json_output(&text)?;
        tracing::info!(
            model = %model,
            name = component_name(&component).unwrap_or("<unnamed>"),
            "Generated component schema"
        );
        Ok(component)
    }

    /// Create the component in the target space
    pub async fn publish(&self, target: &SpaceTarget, component: Value) -> Result<Value, AppError> {
        let component = unwrap_component(component)?;
        let created = self.storyblok.create_component(target, &component).await?;

        tracing::info!(
            space_id = %target.space_id,
            name = component_name(&created).unwrap_or("<unnamed>"),
            "Created Storyblok component"
        );
        Ok(created)
    }

    /// List the components defined in the target space
    pub async fn list(&self, target: &SpaceTarget) -> Result<Vec<Value>, AppError> {
        let components = self.storyblok.list_components(target).await?;
        tracing::debug!(
            space_id = %target.space_id,
            count = components.len(),
            "Fetched Storyblok components"
        );
        Ok(components)
    }
}

/// Use the requested model when one is named, else the configured default
pub fn resolve_model<'a>(requested: Option<&'a str>, default_model: &'a str) -> &'a str {
    requested
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(default_model)
}

/// Accept either a component object or a full `{"component": {...}}` request body
pub fn unwrap_component(value: Value) -> Result<Value, AppError> {
    let component = match value {
        Value::Object(mut map) if map.len() == 1 && map.contains_key("component") => {
            map.remove("component").unwrap_or(Value::Null)
        }
        other => other,
    };

    match component {
        Value::Object(map) if !map.is_empty() => Ok(Value::Object(map)),
        _ => Err(AppError::BadRequest(
            "Component schema is required.".to_string(),
        )),
    }
}

fn component_name(component: &Value) -> Option<&str> {
    component
        .get("name")
        .or_else(|| component.get("component").and_then(|c| c.get("name")))
        .and_then(Value::as_str)
}
