//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod genai;
pub mod storyblok;

pub use genai::TextGenerator;
pub use storyblok::StoryblokClient;
