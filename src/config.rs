use crate::constants::{
    CONFIG_PATH_ENV, DB_PATH_ENV, DEFAULT_ASSETS_DIR, DEFAULT_CONFIG_PATH, DEFAULT_DB_PATH,
    DEFAULT_LOG_DIR, DEFAULT_LOG_FILE, DEFAULT_PORT, PORT_ENV,
};
use crate::domain::Role;
use crate::error::{MenuError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub sessions: Vec<SessionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub assets_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub path: PathBuf,
    /// Seed an empty store with the opening carte.
    pub seed: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            path: PathBuf::from(DEFAULT_DB_PATH),
            seed: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: PathBuf,
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_LOG_DIR),
            file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

/// A bearer token and the session it stands for.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionEntry {
    pub token: String,
    pub name: String,
    #[serde(deserialize_with = "deserialize_role")]
    pub role: Role,
}

fn deserialize_role<'de, D>(deserializer: D) -> std::result::Result<Role, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(Role::parse(&raw))
}

impl Config {
    /// Load from `path`, or from `TIKI_CONFIG` / `config.toml` when no path is given.
    /// Only an explicitly requested file has to exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv::dotenv().ok();

        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    debug!("No {} found, using defaults", DEFAULT_CONFIG_PATH);
                    Config::default()
                }
            }
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            MenuError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(port) = std::env::var(PORT_ENV) {
            self.server.port = port
                .parse()
                .map_err(|_| MenuError::Config(format!("{PORT_ENV} is not a valid port: {port}")))?;
        }
        if let Ok(path) = std::env::var(DB_PATH_ENV) {
            self.storage.path = PathBuf::from(path);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert!(config.storage.seed);
        assert!(config.sessions.is_empty());
    }

    #[test]
    fn test_full_toml() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 8081
            assets_dir = "static"

            [storage]
            backend = "memory"
            seed = false

            [[sessions]]
            token = "t-admin"
            name = "Chef"
            role = "admin"

            [[sessions]]
            token = "t-staff"
            name = "Marie"
            role = "serveuse"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.assets_dir, PathBuf::from("static"));
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.path, PathBuf::from(DEFAULT_DB_PATH));
        assert!(!config.storage.seed);
        assert_eq!(config.sessions[0].role, Role::Admin);
        assert_eq!(config.sessions[1].role, Role::Member);
    }

    #[test]
    fn test_unknown_backend_is_an_error() {
        assert!(Config::from_toml("[storage]\nbackend = \"mongo\"").is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = Config::from_file(Path::new("/nonexistent/tiki.toml")).unwrap_err();
        assert!(matches!(err, MenuError::Config(_)));
    }
}
