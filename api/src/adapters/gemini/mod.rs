//! Gemini adapter
//!
//! Implementation of the text generation port.

pub mod client;

pub use client::GeminiClientImpl;
