use crate::error::ConfigError;
use crate::session::Delays;
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Fixture to load instead of the bundled one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixture_path: Option<PathBuf>,
    /// Local storage database; the user data directory when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
    pub delays: Delays,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // TOML is the primary format. A JSON file from older builds is read as a
    // fallback and rewritten as TOML when found.
    pub fn toml_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("business-nexus.toml"))
    }

    fn legacy_json_path() -> Option<PathBuf> {
        let proj = ProjectDirs::from("com", "imeer", "BusinessNexus")?;
        Some(proj.config_dir().join("config.json"))
    }

    /// Never fails: unreadable files are logged and defaults are used.
    pub fn load() -> Self {
        if let Some(path) = Self::toml_path() {
            if path.exists() {
                match Self::load_from(&path) {
                    Ok(config) => return config,
                    Err(e) => log::warn!("Ignoring config {}: {}", path.display(), e),
                }
            }
        }

        if let Some(legacy) = Self::legacy_json_path() {
            if legacy.exists() {
                match Self::load_legacy(&legacy) {
                    Ok(config) => {
                        if let Err(e) = config.save() {
                            log::warn!("Could not migrate legacy config: {}", e);
                        }
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring legacy config {}: {}", legacy.display(), e),
                }
            }
        }

        Self::new()
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn load_legacy(path: &Path) -> Result<Self, ConfigError> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::toml_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("business_nexus_config_{}", std::process::id()));
        let _ = fs::create_dir_all(&dir);
        dir.join(name)
    }

    #[test]
    fn defaults_match_original_latency() {
        let config = AppConfig::new();
        assert_eq!(config.delays.login_ms, 1500);
        assert_eq!(config.delays.redirect_ms, 500);
        assert_eq!(config.delays.logout_ms, 1000);
        assert!(config.fixture_path.is_none());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            log_filter = "debug"

            [delays]
            login_ms = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
        assert_eq!(config.delays.login_ms, 10);
        assert_eq!(config.delays.logout_ms, 1000);
    }

    #[test]
    fn save_and_load_toml() {
        let path = scratch("roundtrip.toml");
        let config = AppConfig {
            fixture_path: Some(PathBuf::from("/srv/nexus/platform-data.json")),
            delays: Delays::NONE,
            ..AppConfig::new()
        };
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn legacy_json_is_readable() {
        let path = scratch("legacy.json");
        fs::write(&path, r#"{ "storage_path": "/tmp/nexus.sqlite", "delays": { "logout_ms": 5 } }"#).unwrap();
        let config = AppConfig::load_legacy(&path).unwrap();
        assert_eq!(config.storage_path, Some(PathBuf::from("/tmp/nexus.sqlite")));
        assert_eq!(config.delays.logout_ms, 5);
        assert_eq!(config.delays.login_ms, 1500);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let path = scratch("broken.toml");
        fs::write(&path, "delays = [").unwrap();
        assert!(matches!(AppConfig::load_from(&path), Err(ConfigError::Parse(_))));
        let _ = fs::remove_file(&path);
    }
}
