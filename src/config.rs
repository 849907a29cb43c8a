//! Configuration loaded from `config.toml`.
//!
//! Every field has a default, so a missing file or a partial file is fine.

use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub calculator: CalculatorConfig,
    pub server: ServerConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct CalculatorConfig {
    /// How long the error marker stays on the display.
    pub error_clear_delay_ms: u64,
}

impl CalculatorConfig {
    pub fn error_clear_delay(&self) -> Duration {
        Duration::from_millis(self.error_clear_delay_ms)
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            error_clear_delay_ms: 1500,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Directory files are served from.
    pub root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8000,
            root: PathBuf::from("."),
        }
    }
}

/// Default location: `$XDG_CONFIG_HOME/zcalc/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("zcalc").join("config.toml"))
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid configuration")
    }

    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one the default path is tried
    /// and defaults are used if it is absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => {
                    debug!("No config file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(
            config.calculator.error_clear_delay(),
            Duration::from_millis(1500)
        );
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 9090
            root = "public"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.root, PathBuf::from("public"));
        assert_eq!(config.server.host, IpAddr::from([127, 0, 0, 1]));
        assert_eq!(config.calculator.error_clear_delay_ms, 1500);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(Config::from_toml("[server]\nport = \"eighty\"").is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[calculator]\nerror_clear_delay_ms = 250").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.calculator.error_clear_delay_ms, 250);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
