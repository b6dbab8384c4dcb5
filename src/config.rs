//! Configuration management
//!
//! Manages server settings and optional seed expenses loaded into the
//! in-memory store at startup.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::expense::{NewExpense, Recurrence};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Expenses loaded into the store at startup
    #[serde(default)]
    pub seed: Vec<SeedExpense>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// One seed expense entry, in the wire representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedExpense {
    /// Integer recurrence code (1 = Monthly)
    #[serde(rename = "type")]
    pub kind: i64,
    pub amount: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl SeedExpense {
    /// Convert to a store entry, rejecting unknown recurrence codes
    pub fn to_new_expense(&self) -> Result<NewExpense> {
        let recurrence = Recurrence::from_code(self.kind)
            .with_context(|| format!("invalid seed entry (type {})", self.kind))?;
        Ok(NewExpense {
            recurrence,
            amount: self.amount,
            active_from: self.start,
            active_until: self.end,
        })
    }
}

impl Config {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let config_path = config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            let config: Config = toml::from_str(&contents)
                .context("Failed to parse config file")?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = config_path()?;
        let parent = config_path.parent()
            .context("Config path has no parent")?;

        std::fs::create_dir_all(parent)
            .context("Failed to create config directory")?;

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Seed entries converted for the store; fails on an unknown code
    pub fn seed_entries(&self) -> Result<Vec<NewExpense>> {
        self.seed.iter().map(SeedExpense::to_new_expense).collect()
    }
}

/// Path to the configuration file
pub fn config_path() -> Result<PathBuf> {
    let base = directories::ProjectDirs::from("com", "budgeteer", "budgeteer")
        .context("Failed to get project directories")?;
    Ok(base.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert!(config.seed.is_empty());
    }

    #[test]
    fn test_parse_with_seed() {
        let toml_text = r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [[seed]]
            type = 1
            amount = 1234
            start = "2020-02-22T00:00:00Z"
            end = "2022-11-28T00:00:00Z"
        "#;
        let config: Config = toml::from_str(toml_text).unwrap();
        assert_eq!(config.server.port, 8080);

        let entries = config.seed_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].amount, 1234);
        assert_eq!(entries[0].recurrence, Recurrence::Monthly);
        assert_eq!(
            entries[0].active_from,
            Utc.with_ymd_and_hms(2020, 2, 22, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_seed_with_unknown_code_fails() {
        let seed = SeedExpense {
            kind: 9,
            amount: 1,
            start: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap(),
        };
        assert!(seed.to_new_expense().is_err());
    }

    #[test]
    fn test_toml_roundtrip_via_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.server.port = 9000;
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded: Config = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.server.port, 9000);
    }
}
