//! Accessibility report service

use std::sync::Arc;

use serde_json::Value;

use crate::app::component_service::resolve_model;
use crate::app::output_parser::markdown_output;
use crate::app::prompts::accessibility_prompt;
use crate::domain::ports::TextGenerator;
use crate::error::AppError;

pub struct ReportService<G>
where
    G: TextGenerator + ?Sized,
{
    generator: Arc<G>,
    default_model: String,
}

impl<G> ReportService<G>
where
    G: TextGenerator + ?Sized,
{
    pub fn new(generator: Arc<G>, default_model: String) -> Self {
        Self {
            generator,
            default_model,
        }
    }

    /// Review story content and return a Markdown accessibility report
    pub async fn accessibility_report(
        &self,
        story_content: &Value,
        model: Option<&str>,
    ) -> Result<String, AppError> {
        let content = story_text(story_content)?;
        let model = resolve_model(model, &self.default_model);

        let text = self
            .generator
            .generate(model, &accessibility_prompt(&content))
            .await?;

        let report = markdown_output(&text);
        tracing::info!(model = %model, report_len = report.len(), "Generated accessibility report");
        Ok(report)
    }
}

/// Story content as prompt text: strings verbatim, anything else pretty JSON
fn story_text(story_content: &Value) -> Result<String, AppError> {
    match story_content {
        Value::Null => Err(AppError::BadRequest("Story content is required.".to_string())),
        Value::String(s) if s.trim().is_empty() => {
            Err(AppError::BadRequest("Story content is required.".to_string()))
        }
        Value::String(s) => Ok(s.clone()),
        other => {
            serde_json::to_string_pretty(other).map_err(|e| AppError::Internal(e.to_string()))
        }
    }
}
