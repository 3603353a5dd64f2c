//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod gemini;
pub mod storyblok;

pub use gemini::GeminiClientImpl;
pub use storyblok::StoryblokClientImpl;
