// src/config/mod.rs
//! Configuration management module
//!
//! This module handles application configuration loading from a TOML file,
//! environment variables and default values, in that order of precedence
//! (environment wins).

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS allowed origins; `*` allows any origin
    pub cors_origins: Vec<String>,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Which repository adapter backs the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryBackend {
    Memory,
    Surreal,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: RepositoryBackend,
    /// SurrealDB endpoint, e.g. `mem://` or `ws://localhost:8000`
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Timeout for the readiness probe's store check
    pub health_timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            cors_origins: vec!["http://localhost:5000".to_string()],
            request_timeout_secs: 30,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: RepositoryBackend::Surreal,
            url: "mem://".to_string(),
            namespace: "employees_api".to_string(),
            database: "employees_api".to_string(),
            username: None,
            password: None,
            health_timeout_secs: 3,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or `config.toml` when present, then apply
    /// environment overrides. An explicit path must exist.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load_from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Config::default(),
        };

        // Override with environment variables
        config.apply_overrides(|key| std::env::var(key).ok())?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Apply overrides looked up by environment variable name
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.server.port = port.parse().context("Invalid SERVER_PORT")?;
        }

        if let Some(backend) = lookup("DATABASE_BACKEND") {
            self.database.backend = match backend.to_lowercase().as_str() {
                "memory" => RepositoryBackend::Memory,
                "surreal" => RepositoryBackend::Surreal,
                other => return Err(anyhow::anyhow!("Invalid DATABASE_BACKEND: {}", other)),
            };
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(namespace) = lookup("DATABASE_NAMESPACE") {
            self.database.namespace = namespace;
        }
        if let Some(database) = lookup("DATABASE_NAME") {
            self.database.database = database;
        }
        if let Some(username) = lookup("DATABASE_USERNAME") {
            self.database.username = Some(username);
        }
        if let Some(password) = lookup("DATABASE_PASSWORD") {
            self.database.password = Some(password);
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!("Request timeout cannot be 0"));
        }
        for origin in &self.server.cors_origins {
            if origin != "*" {
                HeaderValue::from_str(origin)
                    .with_context(|| format!("Invalid CORS origin: {}", origin))?;
            }
        }

        if self.database.backend == RepositoryBackend::Surreal {
            if self.database.url.is_empty() {
                return Err(anyhow::anyhow!("Database URL cannot be empty"));
            }
            if self.database.namespace.is_empty() || self.database.database.is_empty() {
                return Err(anyhow::anyhow!("Database namespace and name cannot be empty"));
            }
        }
        if self.database.health_timeout_secs == 0 {
            return Err(anyhow::anyhow!("Health check timeout cannot be 0"));
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => return Err(anyhow::anyhow!("Invalid log level: {}", self.logging.level)),
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Address the HTTP server binds to
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.database.backend, RepositoryBackend::Surreal);
        assert_eq!(config.database.health_timeout_secs, 3);
        assert_eq!(config.server_address(), "127.0.0.1:5000");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [database]
            backend = "memory"
            "#,
        )
        .unwrap();

        assert_eq!(config.database.backend, RepositoryBackend::Memory);
        assert_eq!(config.database.url, "mem://");
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn environment_overrides_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SERVER_PORT", "8080"),
            ("DATABASE_BACKEND", "Memory"),
            ("DATABASE_URL", "ws://db:8000"),
            ("LOG_LEVEL", "debug"),
        ]);

        let mut config = Config::default();
        config
            .apply_overrides(|key| env.get(key).map(|value| value.to_string()))
            .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.backend, RepositoryBackend::Memory);
        assert_eq!(config.database.url, "ws://db:8000");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = Config::default();
        assert!(config
            .apply_overrides(|key| (key == "SERVER_PORT").then(|| "http".to_string()))
            .is_err());

        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.database.url.clear();
        assert!(config.validate().is_err());
        config.database.backend = RepositoryBackend::Memory;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn saved_file_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.server.port = 7000;
        config.database.backend = RepositoryBackend::Memory;
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.server.port, 7000);
        assert_eq!(loaded.database.backend, RepositoryBackend::Memory);
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(Config::load_from(Some(&missing)).is_err());

        let path = dir.path().join("written.toml");
        let mut config = Config::default();
        config.database.namespace = "written_ns".to_string();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from(Some(&path)).unwrap();
        if std::env::var("DATABASE_NAMESPACE").is_err() {
            assert_eq!(loaded.database.namespace, "written_ns");
        }
    }
}
