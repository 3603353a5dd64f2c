//! Output parser for model responses
//!
//! Every prompt asks the model to answer inside `<output>...</output>` tags.
//! Models often add prose or Markdown fences around that, so extraction is
//! lenient: take the tagged block when there is one, otherwise the whole text.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::error::ExtractError;

fn output_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<output>(.*?)</output>").expect("output tag pattern is valid"))
}

fn code_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)\A```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)\s*```\z")
            .expect("code fence pattern is valid")
    })
}

/// Return the content of the first non-blank `<output>` block, or the whole text
pub fn extract_output(text: &str) -> &str {
    output_tag()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .find(|inner| !inner.trim().is_empty())
        .unwrap_or(text)
}

/// Remove one surrounding Markdown code fence, if present
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    code_fence()
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(trimmed)
}

/// Extract the tagged block from model text and parse it as JSON
pub fn parse_json_output(text: &str) -> Result<Value, ExtractError> {
    let candidate = strip_code_fence(extract_output(text));

    serde_json::from_str(candidate).map_err(|e| ExtractError::InvalidJson {
        reason: e.to_string(),
        raw: text.to_string(),
    })
}

/// Extract the tagged block from model text as trimmed Markdown
pub fn markdown_output(text: &str) -> String {
    strip_code_fence(extract_output(text)).to_string()
}
