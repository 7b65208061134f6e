use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::timing::domain::time_range::EndAdvancePolicy;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persisted user preferences, stored as JSON in the platform config dir.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub backend_url: Option<String>,
    #[serde(default)]
    pub end_advance: EndAdvancePolicy,
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("ClipScribe").join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Missing or unreadable files fall back to defaults.
    pub fn load_from(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => return Self::default(),
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("ignoring malformed settings at {}: {e}", path.display());
            Self::default()
        })
    }

    pub fn save(&self) -> Result<PathBuf, SettingsError> {
        let path = Self::config_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SettingsError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| SettingsError::Write {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.backend_url, None);
        assert_eq!(settings.end_advance, EndAdvancePolicy::ClampToZero);
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(
            Settings::load_from(&tmp.path().join("settings.json")),
            Settings::default()
        );
    }

    #[test]
    fn test_load_malformed_file_returns_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, r#"{"backend_url": "http://localhost:5000"}"#).unwrap();
        let settings = Settings::load_from(&path);
        assert_eq!(settings.backend_url.as_deref(), Some("http://localhost:5000"));
        assert_eq!(settings.end_advance, EndAdvancePolicy::ClampToZero);
    }

    #[test]
    fn test_save_then_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("settings.json");
        let settings = Settings {
            backend_url: Some("https://stt.example.com".to_string()),
            end_advance: EndAdvancePolicy::KeepWindow,
        };
        settings.save_to(&path).unwrap();

        let json = fs::read_to_string(&path).unwrap();
        assert!(json.contains("\"keep-window\""));
        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn test_config_path_names_app_dir() {
        if let Some(path) = Settings::config_path() {
            assert!(path.to_string_lossy().contains("ClipScribe"));
            assert!(path.ends_with("settings.json"));
        }
    }
}
