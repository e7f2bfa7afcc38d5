//! Configuration management using Figment
//!
//! Defaults, then `restgate.toml`, then `RESTGATE_`-prefixed environment
//! variables, each layer overriding the last.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading failure
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Extraction or merge failure from any configuration layer
    #[error("configuration error: {0}")]
    Figment(#[from] figment::Error),
}

/// Service identity and logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name, used in log output
    pub name: String,
    /// Log level filter directive (e.g. `info`, `restgate=debug`)
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "restgate".to_owned(),
            log_level: "info".to_owned(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Service identity and logging
    #[serde(default)]
    pub service: ServiceConfig,
}

impl Config {
    /// Load configuration from defaults, `restgate.toml`, and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("restgate.toml")
    }

    /// Load configuration with an explicit file path
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("RESTGATE_").split("__"))
            .extract()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.service.name, "restgate");
        assert_eq!(config.service.log_level, "info");
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        figment::Jail::expect_with(|_jail| {
            let config = Config::load().expect("load should fall back to defaults");
            assert_eq!(config.service.name, "restgate");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("RESTGATE_SERVICE__LOG_LEVEL", "debug");
            let config = Config::load().expect("load");
            assert_eq!(config.service.log_level, "debug");
            Ok(())
        });
    }

    #[test]
    fn test_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "restgate.toml",
                r#"
                [service]
                name = "edge-gateway"
                "#,
            )?;
            let config = Config::load().expect("load");
            assert_eq!(config.service.name, "edge-gateway");
            assert_eq!(config.service.log_level, "info");
            Ok(())
        });
    }
}
