//! Storyblok space target
//!
//! The space id and management token a MAPI call is made against.

use std::fmt;

/// Token value the editor front end sends before a real token is configured
pub const PLACEHOLDER_TOKEN: &str = "temp";

/// A resolved Storyblok space and its management token
#[derive(Clone, PartialEq, Eq)]
pub struct SpaceTarget {
    pub space_id: String,
    pub access_token: String,
}

impl SpaceTarget {
    pub fn new(space_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            space_id: space_id.into(),
            access_token: access_token.into(),
        }
    }
}

// Tokens never end up in logs
impl fmt::Debug for SpaceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpaceTarget")
            .field("space_id", &self.space_id)
            .field("access_token", &"<redacted>")
            .finish()
    }
}
