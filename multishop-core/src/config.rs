//! Service configuration
//!
//! Layering, lowest to highest precedence:
//! 1. Built-in defaults
//! 2. `~/.multishop/config.toml` (or an explicit path); a missing file is not an error
//! 3. Environment: `DATABASE_URL`, `MULTISHOP_BIND`, `MULTISHOP_MAX_CONNECTIONS`
//! 4. CLI flags (applied by the binary)

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};

pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_BIND: &str = "MULTISHOP_BIND";
pub const ENV_MAX_CONNECTIONS: &str = "MULTISHOP_MAX_CONNECTIONS";

/// Top-level configuration shared by the discount and order services
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

/// Relational store connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string
    pub url: String,
    /// Upper bound on pooled connections
    pub max_connections: u32,
    /// How long an operation waits for a free connection
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/multishop".to_string(),
            max_connections: 5,
            acquire_timeout_secs: 5,
        }
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Allow any CORS origin instead of localhost only
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3030)),
            cors_permissive: false,
        }
    }
}

impl ShopConfig {
    /// Load from the default path and apply environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path` (defaults if it does not exist) and apply environment overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path).map_err(|source| CoreError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml_str(&content, path)?
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Parse TOML content; `origin` is only used in error messages.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| CoreError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Get config file path: ~/.multishop/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".multishop/config.toml")
    }

    /// Apply overrides from a key lookup (the environment, in production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_DATABASE_URL).filter(|v| !v.is_empty()) {
            self.database.url = url;
        }

        if let Some(bind) = lookup(ENV_BIND) {
            self.server.bind = bind
                .parse()
                .map_err(|e: std::net::AddrParseError| CoreError::invalid_value(ENV_BIND, e.to_string()))?;
        }

        if let Some(max) = lookup(ENV_MAX_CONNECTIONS) {
            let max: u32 = max
                .parse()
                .map_err(|e: std::num::ParseIntError| CoreError::invalid_value(ENV_MAX_CONNECTIONS, e.to_string()))?;
            if max == 0 {
                return Err(CoreError::invalid_value(ENV_MAX_CONNECTIONS, "must be at least 1"));
            }
            self.database.max_connections = max;
        }

        Ok(())
    }

    /// Render as TOML (used by `multishop config show`).
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Database URL with the password masked, for logs.
    pub fn redacted_database_url(&self) -> String {
        redact_url(&self.database.url)
    }
}

fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((credentials, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };
    match credentials.split_once(':') {
        Some((user, _)) => format!("{}://{}:***@{}", scheme, user, host),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = ShopConfig::default();
        assert_eq!(config.server.bind.port(), 3030);
        assert_eq!(config.database.max_connections, 5);
        assert!(!config.server.cors_permissive);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = ShopConfig::from_toml_str(
            r#"
            [database]
            url = "postgres://shop@db/discount"
            "#,
            Path::new("inline"),
        )
        .unwrap();

        assert_eq!(config.database.url, "postgres://shop@db/discount");
        assert_eq!(config.database.acquire_timeout_secs, 5);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn invalid_toml_names_origin() {
        let err = ShopConfig::from_toml_str("[database\nurl=", Path::new("/tmp/bad.toml")).unwrap_err();
        assert!(matches!(err, CoreError::Parse { .. }));
        assert!(err.to_string().contains("/tmp/bad.toml"));
    }

    #[test]
    fn overrides_take_precedence() {
        let mut config = ShopConfig::default();
        config
            .apply_overrides(lookup_from(&[
                (ENV_DATABASE_URL, "postgres://order-db/order"),
                (ENV_BIND, "0.0.0.0:8080"),
                (ENV_MAX_CONNECTIONS, "12"),
            ]))
            .unwrap();

        assert_eq!(config.database.url, "postgres://order-db/order");
        assert_eq!(config.server.bind.port(), 8080);
        assert_eq!(config.database.max_connections, 12);
    }

    #[test]
    fn empty_database_url_is_ignored() {
        let mut config = ShopConfig::default();
        config
            .apply_overrides(lookup_from(&[(ENV_DATABASE_URL, "")]))
            .unwrap();
        assert_eq!(config.database.url, DatabaseConfig::default().url);
    }

    #[test]
    fn rejects_bad_bind() {
        let mut config = ShopConfig::default();
        let err = config
            .apply_overrides(lookup_from(&[(ENV_BIND, "not-an-address")]))
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidValue { .. }));
    }

    #[test]
    fn rejects_zero_connections() {
        let mut config = ShopConfig::default();
        let err = config
            .apply_overrides(lookup_from(&[(ENV_MAX_CONNECTIONS, "0")]))
            .unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn toml_round_trips() {
        let config = ShopConfig::default();
        let rendered = config.to_toml().unwrap();
        let parsed = ShopConfig::from_toml_str(&rendered, Path::new("rendered")).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn redacts_password() {
        assert_eq!(
            redact_url("postgres://shop:s3cret@db:5432/discount"),
            "postgres://shop:***@db:5432/discount"
        );
        assert_eq!(redact_url("postgres://localhost/multishop"), "postgres://localhost/multishop");
    }
}
