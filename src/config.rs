use crate::error::{HobbyistError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".hobbyist.toml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "HOBBYIST_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HobbyistConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    /// Allowed CORS origins. `"*"` allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            cors_origins: default_cors_origins(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    #[default]
    File,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Directory for the file backend, relative to the project root.
    #[serde(default = "default_store_path")]
    pub path: String,
}

fn default_store_path() -> String {
    ".hobbyist".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: default_store_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl HobbyistConfig {
    /// Loads the config named by `HOBBYIST_CONFIG`, or the nearest
    /// `.hobbyist.toml` at or above `start_path`. Without either, defaults are
    /// used and `start_path` is the project root.
    pub fn load(start_path: &Path) -> Result<(Self, PathBuf)> {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let config_path = match explicit {
            Some(path) if !path.exists() => {
                return Err(HobbyistError::Config(format!(
                    "{} points at missing file {}",
                    CONFIG_ENV,
                    path.display()
                )));
            }
            Some(path) => Some(path),
            None => Self::find_config_file(start_path),
        };

        match config_path {
            Some(path) => {
                let config = Self::load_file(&path)?;
                let project_root = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| start_path.to_path_buf());
                Ok((config, project_root))
            }
            None => Ok((Self::default(), start_path.to_path_buf())),
        }
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: HobbyistConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    pub fn data_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.store.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = HobbyistConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.cors_origins, vec!["*"]);
        assert_eq!(config.store.backend, StoreBackend::File);
        assert_eq!(config.store.path, ".hobbyist");
        assert_eq!(config.log.level, "info");
        assert!(config.log.file.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: HobbyistConfig = toml::from_str(
            r#"
[store]
backend = "memory"

[server]
cors_origins = ["http://localhost:3000"]
"#,
        )
        .unwrap();

        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.store.path, ".hobbyist");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.cors_origins, vec!["http://localhost:3000"]);
    }

    #[test]
    fn test_find_config_file_walks_upward() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "").unwrap();

        let found = HobbyistConfig::find_config_file(&nested).unwrap();
        assert_eq!(found, temp_dir.path().join(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_data_path_is_relative_to_root() {
        let config = HobbyistConfig::default();
        assert_eq!(
            config.data_path(Path::new("/srv/app")),
            PathBuf::from("/srv/app/.hobbyist")
        );
    }

    #[test]
    fn test_invalid_backend_is_error() {
        let result: std::result::Result<HobbyistConfig, _> =
            toml::from_str("[store]\nbackend = \"postgres\"\n");
        assert!(result.is_err());
    }
}
