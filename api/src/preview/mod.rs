//! Preview module
//!
//! Read-only editor previews for component schemas.

pub mod builder;
pub mod renderer;

pub use builder::build_preview;
pub use renderer::render_preview;
