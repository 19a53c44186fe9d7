//! Settings persistence.
//!
//! Settings are read from `settings.toml` in the platform configuration folder:
//! - macOS: ~/Library/Application Support/com.dmt-builder.DMT Builder/
//! - Windows: %APPDATA%/dmt-builder/DMT Builder/config/
//! - Linux: ~/.config/dmtbuilder/
//!
//! A missing or unreadable file means defaults; the builder never writes it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use dmt_model::{DEFAULT_CLASS_ID, DEFAULT_COMPANY, DEFAULT_LIFECYCLE_STAGE};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "dmt-builder";
const APP_NAME: &str = "DMT Builder";
const CONFIG_FILENAME: &str = "settings.toml";

/// Operator defaults (persisted as TOML).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Company for single-part builds.
    pub company: String,
    /// Website choices offered for Part files; the first is the default.
    pub part_websites: Vec<String>,
    /// Website choices offered for category rows; the first is the default.
    pub category_websites: Vec<String>,
    /// `ClassID` written for new parts.
    pub class_id: String,
    /// `UserChar1` lifecycle stage written for new parts.
    pub lifecycle_stage: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            company: DEFAULT_COMPANY.to_string(),
            part_websites: vec!["SA".to_string(), "SW".to_string(), "SA~SW".to_string()],
            category_websites: vec!["SA".to_string(), "SW".to_string()],
            class_id: DEFAULT_CLASS_ID.to_string(),
            lifecycle_stage: DEFAULT_LIFECYCLE_STAGE.to_string(),
        }
    }
}

impl Settings {
    /// Default Part website (first configured choice).
    pub fn default_part_website(&self) -> &str {
        self.part_websites.first().map_or("SA", String::as_str)
    }

    /// Default category website (first configured choice).
    pub fn default_category_website(&self) -> &str {
        self.category_websites.first().map_or("SA", String::as_str)
    }
}

/// Settings together with the file they were looked up at.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub path: Option<PathBuf>,
    /// Whether `path` existed and parsed.
    pub from_file: bool,
}

/// Get the path to the platform settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings from `override_path` or the platform location.
///
/// Falls back to defaults when the file is missing, unreadable or malformed.
pub fn load_settings(override_path: Option<&Path>) -> LoadedSettings {
    let path = override_path.map(Path::to_path_buf).or_else(settings_path);
    let Some(path) = path else {
        warn!("could not determine settings path, using defaults");
        return LoadedSettings {
            settings: Settings::default(),
            path: None,
            from_file: false,
        };
    };

    let loaded = match fs::read_to_string(&path) {
        Ok(content) => match toml::from_str::<Settings>(&content) {
            Ok(settings) => {
                info!(path = %path.display(), "loaded settings");
                Some(settings)
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "failed to parse settings, using defaults");
                None
            }
        },
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no settings file, using defaults");
            None
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "failed to read settings, using defaults");
            None
        }
    };

    LoadedSettings {
        from_file: loaded.is_some(),
        settings: loaded.unwrap_or_default(),
        path: Some(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "company = \"ACME\"\npart_websites = [\"SW\"]\n").unwrap();

        let loaded = load_settings(Some(&path));
        assert!(loaded.from_file);
        assert_eq!(loaded.settings.company, "ACME");
        assert_eq!(loaded.settings.default_part_website(), "SW");
        assert_eq!(loaded.settings.class_id, "FG");
        assert_eq!(loaded.settings.category_websites, vec!["SA", "SW"]);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "company = [").unwrap();

        let loaded = load_settings(Some(&path));
        assert!(!loaded.from_file);
        assert_eq!(loaded.settings, Settings::default());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_settings(Some(&dir.path().join("absent.toml")));
        assert!(!loaded.from_file);
        assert_eq!(loaded.settings.company, "SAINC");
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let text = toml::to_string_pretty(&Settings::default()).unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}
