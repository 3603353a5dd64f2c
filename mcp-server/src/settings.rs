//! Editor settings
//!
//! The Storyblok personal access token and space id the editor publishes with,
//! kept in a JSON file between sessions.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to access settings file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Settings file {} is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_id: Option<String>,
}

impl Settings {
    /// Apply an update. `None` keeps a value, an empty string clears it.
    pub fn merge(&mut self, access_token: Option<String>, space_id: Option<String>) {
        if let Some(token) = access_token {
            self.access_token = non_blank(token);
        }
        if let Some(space) = space_id {
            self.space_id = non_blank(space);
        }
    }

    /// Token with all but the last four characters hidden
    pub fn masked_token(&self) -> Option<String> {
        self.access_token.as_ref().map(|token| {
            let chars: Vec<char> = token.chars().collect();
            if chars.len() <= 4 {
                "****".to_string()
            } else {
                let tail: String = chars[chars.len() - 4..].iter().collect();
                format!("****{}", tail)
            }
        })
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Reads and writes the settings file
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Use BLOKPILOT_SETTINGS when set, else `<config dir>/blokpilot/settings.json`
    pub fn from_env() -> Self {
        let path = std::env::var("BLOKPILOT_SETTINGS")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_path);
        Self::new(path)
    }

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings; a missing file yields empty settings
    pub fn load(&self) -> Result<Settings, SettingsError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Settings::default()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(settings).map_err(|source| {
            SettingsError::Parse {
                path: self.path.clone(),
                source,
            }
        })?;

        std::fs::write(&self.path, json).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(path = %self.path.display(), "Saved settings");
        Ok(())
    }
}

fn default_path() -> PathBuf {
    let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config_dir.join("blokpilot").join("settings.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));

        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn save_creates_directory_and_round_trips() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("nested").join("settings.json"));
        let settings = Settings {
            access_token: Some("abcdef123".into()),
            space_id: Some("42".into()),
        };

        store.save(&settings).unwrap();

        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn load_rejects_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ nope").unwrap();

        let err = SettingsStore::new(path.clone()).load().unwrap_err();

        assert!(matches!(err, SettingsError::Parse { .. }));
    }

    #[test]
    fn merge_keeps_and_clears() {
        let mut settings = Settings {
            access_token: Some("old".into()),
            space_id: Some("1".into()),
        };

        settings.merge(None, Some("2".into()));
        assert_eq!(settings.access_token.as_deref(), Some("old"));
        assert_eq!(settings.space_id.as_deref(), Some("2"));

        settings.merge(Some("  ".into()), None);
        assert!(settings.access_token.is_none());
    }

    #[test]
    fn masked_token_hides_prefix() {
        let settings = Settings {
            access_token: Some("abcdef1234".into()),
            space_id: None,
        };
        assert_eq!(settings.masked_token().as_deref(), Some("****1234"));

        let short = Settings {
            access_token: Some("abc".into()),
            space_id: None,
        };
        assert_eq!(short.masked_token().as_deref(), Some("****"));
        assert!(Settings::default().masked_token().is_none());
    }

    #[test]
    fn empty_settings_serialize_to_empty_object() {
        assert_eq!(serde_json::to_string(&Settings::default()).unwrap(), "{}");
    }
}
