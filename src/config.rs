use crate::error::{PlaintsError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "plaints.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaintsConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Data directory, relative to the project root.
    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default = "default_tracking_prefix")]
    pub tracking_prefix: String,

    #[serde(default = "default_tracking_length")]
    pub tracking_length: usize,
}

fn default_path() -> String {
    ".plaints".to_string()
}

fn default_tracking_prefix() -> String {
    "CMP-".to_string()
}

fn default_tracking_length() -> usize {
    8
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: default_path(),
            tracking_prefix: default_tracking_prefix(),
            tracking_length: default_tracking_length(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Bearer token required for status updates. Unset means open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_token: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            staff_token: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl PlaintsConfig {
    /// Loads the config found at or above `start_path`. Returns the config and
    /// the project root (the directory holding the config file).
    pub fn load(start_path: &Path) -> Result<(Self, PathBuf)> {
        let config_path = Self::find_config_file(start_path)?;
        Self::load_file(&config_path)
    }

    pub fn load_file(config_path: &Path) -> Result<(Self, PathBuf)> {
        let content = std::fs::read_to_string(config_path)?;
        let config: PlaintsConfig = toml::from_str(&content)?;
        let project_root = config_path
            .parent()
            .ok_or_else(|| PlaintsError::Config("Config file has no parent directory".to_string()))?
            .to_path_buf();
        Ok((config, project_root))
    }

    pub fn find_config_file(start_path: &Path) -> Result<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Ok(config_path);
            }
            if !current.pop() {
                return Err(PlaintsError::NotInitialized);
            }
        }
    }

    pub fn data_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.store.path)
    }

    pub fn log_path(&self, project_root: &Path) -> Option<PathBuf> {
        self.logging.file.as_ref().map(|f| project_root.join(f))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PlaintsError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: PlaintsConfig = toml::from_str("").unwrap();
        assert_eq!(config.store.path, ".plaints");
        assert_eq!(config.store.tracking_prefix, "CMP-");
        assert_eq!(config.store.tracking_length, 8);
        assert_eq!(config.server.port, 5000);
        assert!(config.server.staff_token.is_none());
    }

    #[test]
    fn test_partial_override() {
        let config: PlaintsConfig = toml::from_str(
            r#"
[server]
port = 8080
staff_token = "s3cret"
"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.staff_token.as_deref(), Some("s3cret"));
        assert_eq!(config.store.path, ".plaints");
    }

    #[test]
    fn test_find_config_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        PlaintsConfig::default()
            .save(&temp_dir.path().join(CONFIG_FILE_NAME))
            .unwrap();
        let nested = temp_dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, root) = PlaintsConfig::load(&nested).unwrap();
        assert_eq!(root, temp_dir.path());
        assert_eq!(config.data_path(&root), temp_dir.path().join(".plaints"));
    }

    #[test]
    fn test_missing_config_is_not_initialized() {
        let temp_dir = TempDir::new().unwrap();
        assert!(matches!(
            PlaintsConfig::load(temp_dir.path()),
            Err(PlaintsError::NotInitialized)
        ));
    }
}
