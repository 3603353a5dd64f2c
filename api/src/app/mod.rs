//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate prompts, the text generator and the Storyblok client.

pub mod component_service;
pub mod output_parser;
pub mod prompts;
pub mod report_service;
pub mod space_resolver;
pub mod story_service;

pub use component_service::ComponentService;
pub use report_service::ReportService;
pub use space_resolver::SpaceDefaults;
pub use story_service::StoryService;
