//! Text generation port trait
//!
//! Defines the interface for a generative text model.

use async_trait::async_trait;

use crate::error::GenAiError;

/// A prompt-in, text-out generative model
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt` with the named model
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, GenAiError>;
}
