//! Domain entities
//!
//! Read-only views over Storyblok data plus the space a call targets.
//! Component and story JSON itself stays opaque and is passed through.

pub mod component;
pub mod space;

pub use component::{value_text, FieldDefinition, FieldOption, FieldType};
pub use space::{SpaceTarget, PLACEHOLDER_TOKEN};
