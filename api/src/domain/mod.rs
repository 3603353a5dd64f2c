//! Domain layer
//!
//! Contains the data views and port traits, with no external I/O.
//! - `entities`: Views over Storyblok data and the targeted space
//! - `ports`: Trait definitions for external dependencies

pub mod entities;
pub mod ports;
