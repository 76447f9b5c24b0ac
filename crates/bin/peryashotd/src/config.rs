//! Daemon settings: an optional TOML file, then environment overrides.
//!
//! The file defaults to `peryashot.toml` in the working directory and can be
//! moved with `PERYASHOT_CONFIG`. Any field may be omitted.

use std::path::Path;

use peryashot_adapter_storage_sqlite_sqlx::Config as StorageConfig;
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "peryashot.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind, e.g. `0.0.0.0`.
    pub host: String,
    pub port: u16,
}

/// Game database.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// sqlx `SQLite` URL, e.g. `sqlite:peryashot.db?mode=rwc`.
    pub url: String,
    /// Connections kept open; `1` is a single persistent link.
    pub max_connections: u32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive.
    pub filter: String,
}

impl Config {
    /// Read the config file (if any), apply environment overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or if the
    /// merged values are invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let var = |key: &str| std::env::var(key).ok();
        let path = var("PERYASHOT_CONFIG").unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(Path::new(&path))?;
        config.apply_overrides(var);
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("PERYASHOT_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("PERYASHOT_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        // Applied only when both halves parse.
        if let Some(val) = var("PERYASHOT_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
            && let Ok(port) = port.parse()
        {
            self.server.host = host.to_string();
            self.server.port = port;
        }
        if let Some(val) = var("PERYASHOT_DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(max) = var("PERYASHOT_DB_MAX_CONNECTIONS").and_then(|val| val.parse().ok()) {
            self.database.max_connections = max;
        }
        // `RUST_LOG` wins over `PERYASHOT_LOG`.
        if let Some(val) = var("RUST_LOG").or_else(|| var("PERYASHOT_LOG")) {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port must be non-zero".to_string()));
        }
        match self.database.max_connections {
            0 => Err(ConfigError::Validation(
                "database.max_connections must be at least 1".to_string(),
            )),
            // Every pooled connection to an in-memory database opens its own empty copy.
            n if n > 1 && self.database.is_in_memory() => Err(ConfigError::Validation(
                "an in-memory database requires database.max_connections = 1".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// `host:port` for the TCP listener.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl DatabaseConfig {
    fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }

    /// Settings handed to the storage adapter.
    #[must_use]
    pub fn storage(&self) -> StorageConfig {
        StorageConfig {
            database_url: self.url.clone(),
            max_connections: self.max_connections,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:peryashot.db?mode=rwc".to_string(),
            max_connections: 1,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "peryashotd=info,peryashot=info,tower_http=debug".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Validation(String),
}
