//! Gemini API client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::ports::TextGenerator;
use crate::error::GenAiError;

/// Implementation of the text generation port on Google's Gemini API
pub struct GeminiClientImpl {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeminiClientImpl {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GenAiError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn api_url(&self, model: &str) -> String {
        let model = model.trim().trim_start_matches("models/");
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

/// Request types for the Gemini API
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Response types from the Gemini API
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Pull the generated text out of a response.
///
/// The first candidate's text parts are concatenated, matching what the
/// Gemini SDKs return from `response.text()`.
fn response_text(response: GenerateContentResponse) -> Result<String, GenAiError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let blocked = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .is_some();
        return Err(if blocked {
            GenAiError::ContentFiltered
        } else {
            GenAiError::EmptyResponse
        });
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(match candidate.finish_reason.as_deref() {
            Some("SAFETY") | Some("PROHIBITED_CONTENT") | Some("BLOCKLIST") => {
                GenAiError::ContentFiltered
            }
            _ => GenAiError::EmptyResponse,
        });
    }

    Ok(text)
}

#[async_trait]
impl TextGenerator for GeminiClientImpl {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, GenAiError> {
        let api_key = self.api_key.as_deref().ok_or(GenAiError::NotConfigured)?;

        tracing::debug!(model = %model, prompt_len = prompt.len(), "Sending request to Gemini API");

        let resp = self
            .http
            .post(self.api_url(model))
            .header("x-goog-api-key", api_key)
            .json(&GenerateContentRequest {
                contents: vec![Content {
                    role: "user",
                    parts: vec![RequestPart { text: prompt }],
                }],
            })
            .send()
            .await?;

        let status = resp.status();
        if status.as_u16() == 429 {
            return Err(GenAiError::RateLimited);
        }
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(GenAiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| GenAiError::Deserialization(e.to_string()))?;

        let text = response_text(body)?;
        tracing::debug!(model = %model, output_len = text.len(), "Gemini response received");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).unwrap()
    }

    fn client() -> GeminiClientImpl {
        GeminiClientImpl::new(
            "https://generativelanguage.googleapis.com/v1beta/".to_string(),
            Some("key".to_string()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn api_url_includes_model_and_method() {
        assert_eq!(
            client().api_url("gemini-2.0-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn api_url_accepts_prefixed_model_names() {
        assert!(client()
            .api_url("models/gemini-1.5-pro")
            .ends_with("/models/gemini-1.5-pro:generateContent"));
    }

    #[test]
    fn request_serializes_single_user_part() {
        let req = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: "hello" }],
            }],
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(
            json,
            r#"{"contents":[{"role":"user","parts":[{"text":"hello"}]}]}"#
        );
    }

    #[test]
    fn text_parts_are_concatenated() {
        let body = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"<output>"},{"text":"{}</output>"}]},"finishReason":"STOP"}]}"#,
        );
        assert_eq!(response_text(body).unwrap(), "<output>{}</output>");
    }

    #[test]
    fn missing_candidates_is_empty_response() {
        let body = parse(r#"{"candidates":[]}"#);
        assert!(matches!(response_text(body), Err(GenAiError::EmptyResponse)));
    }

    #[test]
    fn blocked_prompt_is_content_filtered() {
        let body = parse(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);
        assert!(matches!(
            response_text(body),
            Err(GenAiError::ContentFiltered)
        ));
    }

    #[test]
    fn safety_stop_without_text_is_content_filtered() {
        let body = parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#);
        assert!(matches!(
            response_text(body),
            Err(GenAiError::ContentFiltered)
        ));
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let client = GeminiClientImpl::new(
            "http://127.0.0.1:9".to_string(),
            None,
            Duration::from_secs(1),
        )
        .unwrap();
        let result = client.generate("gemini-2.0-flash", "hi").await;
        assert!(matches!(result, Err(GenAiError::NotConfigured)));
    }

    // ===== HTTP behaviour against a local Gemini stand-in =====

    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GeminiClientImpl {
        GeminiClientImpl::new(
            server.uri(),
            Some("gemini-key".to_string()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn generate_sends_key_header_and_returns_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .and(header("x-goog-api-key", "gemini-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "<output>{}</output>" }] },
                    "finishReason": "STOP"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server)
            .generate("gemini-2.0-flash", "hello")
            .await
            .unwrap();

        assert_eq!(text, "<output>{}</output>");
    }

    #[tokio::test]
    async fn status_429_is_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .generate("gemini-2.0-flash", "hello")
            .await;

        assert!(matches!(result, Err(GenAiError::RateLimited)));
    }

    #[tokio::test]
    async fn other_failures_keep_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .generate("gemini-2.0-flash", "hello")
            .await;

        match result {
            Err(GenAiError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_deserialization_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .generate("gemini-2.0-flash", "hello")
            .await;

        assert!(matches!(result, Err(GenAiError::Deserialization(_))));
    }
}
