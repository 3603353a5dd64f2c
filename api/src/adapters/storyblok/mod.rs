//! Storyblok adapter
//!
//! Implementation of the Storyblok Management API client.

pub mod client;

pub use client::StoryblokClientImpl;
