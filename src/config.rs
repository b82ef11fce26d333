// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::aggregate::{DEFAULT_ACTIVITY_LIMIT, DEFAULT_SCHEDULE_DAYS};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub database: DatabaseConfig,

    pub security: SecurityConfig,

    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default tracing filter; `RUST_LOG` wins when set.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub max_workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            max_workers: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub schema_path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "farmers.sqlite3".to_string(),
            schema_path: "sql/schema.sql".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// How long a login session stays valid.
    pub session_ttl_days: i64,

    /// Argon2 memory cost in KiB.
    pub argon2_memory_cost_kib: u32,

    /// Argon2 iterations.
    pub argon2_time_cost: u32,

    pub argon2_parallelism: u32,

    /// Adds `Secure` to the session cookie. Enable when served over HTTPS.
    pub cookie_secure: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            session_ttl_days: 7,
            argon2_memory_cost_kib: 8192,
            argon2_time_cost: 3,
            argon2_parallelism: 1,
            cookie_secure: false,
        }
    }
}

impl SecurityConfig {
    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl_days * 24 * 60 * 60
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Entries shown in the dashboard's recent activity list.
    pub recent_activity_limit: usize,

    /// Days ahead covered by the harvest calendar on the reports page.
    pub schedule_days: i64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_activity_limit: DEFAULT_ACTIVITY_LIMIT,
            schedule_days: DEFAULT_SCHEDULE_DAYS,
        }
    }
}

impl Config {
    /// First config file found wins; no file at all means defaults. The path
    /// is returned so it can be logged once tracing is initialised.
    pub fn load() -> Result<(Self, Option<PathBuf>)> {
        match Self::locate(Self::config_paths()) {
            Some(path) => Ok((Self::load_from_path(&path)?, Some(path))),
            None => Ok((Self::default(), None)),
        }
    }

    fn locate(paths: Vec<PathBuf>) -> Option<PathBuf> {
        paths.into_iter().find(|p| p.exists())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("farmer_registry").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".farmer_registry").join("config.toml"));
        }

        paths
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.max_workers == 0 {
            anyhow::bail!("server.max_workers must be > 0");
        }
        if self.database.path.trim().is_empty() {
            anyhow::bail!("database.path cannot be empty");
        }
        if self.database.schema_path.trim().is_empty() {
            anyhow::bail!("database.schema_path cannot be empty");
        }
        if self.security.session_ttl_days <= 0 {
            anyhow::bail!("security.session_ttl_days must be > 0");
        }
        if self.dashboard.schedule_days < 0 {
            anyhow::bail!("dashboard.schedule_days cannot be negative");
        }
        Ok(())
    }

    pub fn session_ttl_secs(&self) -> i64 {
        self.security.session_ttl_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.max_workers, 8);
        assert_eq!(config.security.session_ttl_days, 7);
        assert_eq!(config.dashboard.recent_activity_limit, 5);
        assert_eq!(config.dashboard.schedule_days, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[database]"));
        assert!(toml_str.contains("[security]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [server]
            max_workers = 2
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.server.max_workers, 2);
        assert_eq!(config.database.path, "farmers.sqlite3");
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let mut config = Config::default();
        config.server.max_workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_locate_picks_first_existing_file() {
        let dir = std::env::temp_dir()
            .join(format!("farmer_registry_cfg_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let missing = dir.join("missing.toml");
        let present = dir.join("config.toml");
        std::fs::write(&present, "[server]\nmax_workers = 3\n").unwrap();

        let found = Config::locate(vec![missing.clone(), present.clone()]);
        assert_eq!(found.as_deref(), Some(present.as_path()));
        assert_eq!(Config::locate(vec![missing]), None);

        let config = Config::load_from_path(&present).unwrap();
        assert_eq!(config.server.max_workers, 3);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
