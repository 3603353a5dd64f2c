//! Space resolution
//!
//! Requests may name a space and token; the server config supplies defaults.

use crate::domain::entities::{SpaceTarget, PLACEHOLDER_TOKEN};
use crate::error::AppError;

/// Server-side fallbacks for the Storyblok space and token
#[derive(Debug, Clone, Default)]
pub struct SpaceDefaults {
    pub space_id: Option<String>,
    pub access_token: Option<String>,
}

impl SpaceDefaults {
    pub fn new(space_id: Option<String>, access_token: Option<String>) -> Self {
        Self {
            space_id,
            access_token,
        }
    }

    /// Resolve the target of a MAPI call. Request values win over defaults.
    pub fn resolve(
        &self,
        space_id: Option<&str>,
        access_token: Option<&str>,
    ) -> Result<SpaceTarget, AppError> {
        let space_id = pick(space_id, self.space_id.as_deref())
            .ok_or_else(|| AppError::BadRequest("Space ID is required.".to_string()))?;

        let access_token = match pick(access_token, self.access_token.as_deref()) {
            Some(token) if token != PLACEHOLDER_TOKEN => token,
            Some(_) => {
                tracing::warn!(
                    space_id = %space_id,
                    "Placeholder access token used for Storyblok Management API"
                );
                return Err(AppError::Unauthorized(
                    "Missing or invalid access token.".to_string(),
                ));
            }
            None => {
                return Err(AppError::Unauthorized(
                    "Missing or invalid access token.".to_string(),
                ))
            }
        };

        Ok(SpaceTarget::new(space_id, access_token))
    }
}

fn pick<'a>(requested: Option<&'a str>, fallback: Option<&'a str>) -> Option<&'a str> {
    requested
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| fallback.map(str::trim).filter(|v| !v.is_empty()))
}
