use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use hotel_cd_core::Config;

/// CLI configuration loaded from TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Cooldown stamped onto new entries
    #[serde(default)]
    pub default_cd_days: Option<u32>,

    /// Hotels JSON file
    #[serde(default)]
    pub store_path: Option<String>,

    /// Colored terminal output
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            default_cd_days: None,
            store_path: None,
            color: default_color(),
        }
    }
}

impl CliConfig {
    /// Return the default config directory path: ~/.config/hotel-cd/
    pub fn default_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("could not determine user config directory")?
            .join("hotel-cd");
        Ok(config_dir)
    }

    /// Return the default config file path.
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.toml"))
    }

    /// Load config from the given path, or the default path.
    /// Returns default config if the file does not exist.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => match Self::default_config_path() {
                Ok(p) => p,
                Err(e) => {
                    debug!(error = %e, "No config directory, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        if config_path.exists() {
            debug!(?config_path, "Loading config");
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read config: {}", config_path.display()))?;
            let config: Self = toml::from_str(&content)
                .with_context(|| format!("failed to parse config: {}", config_path.display()))?;
            Ok(config)
        } else {
            debug!(?config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Resolve the default cooldown.
    /// Priority: cli_override > env var > config file > built-in default.
    /// An env value that does not parse as a period is skipped.
    pub fn resolve_default_cd(&self, env: &Config, cli_override: Option<u32>) -> u32 {
        cli_override
            .or_else(|| env.env_default_cd_days())
            .or(self.default_cd_days)
            .unwrap_or(env.default_cd_days)
    }

    /// Resolve the hotels file.
    /// Priority: cli_override > env var > config file > built-in default.
    pub fn resolve_store_path(&self, env: &Config, cli_override: Option<&str>) -> PathBuf {
        if let Some(path) = cli_override {
            return PathBuf::from(path);
        }
        if env.is_set("HOTELS_FILE") || env.is_set("DATA_DIR") {
            return env.hotels_file.clone();
        }
        match &self.store_path {
            Some(path) => PathBuf::from(path),
            None => env.hotels_file.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_config() -> Config {
        // A profile no test environment defines keeps lookups on the
        // built-in defaults unless an unprefixed key is exported.
        Config::for_profile("HCDCLI_UNSET")
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.default_cd_days, None);
        assert!(config.color);
    }

    #[test]
    fn test_cli_override_wins() {
        let config = CliConfig {
            default_cd_days: Some(45),
            store_path: Some("/tmp/from-file.json".into()),
            color: true,
        };
        let env = env_config();
        assert_eq!(config.resolve_default_cd(&env, Some(7)), 7);
        assert_eq!(
            config.resolve_store_path(&env, Some("/tmp/cli.json")),
            PathBuf::from("/tmp/cli.json")
        );
    }

    #[test]
    fn test_file_beats_builtin_default() {
        let env = env_config();
        if env.env_default_cd_days().is_some() || env.is_set("HOTELS_FILE") || env.is_set("DATA_DIR") {
            return;
        }
        let config = CliConfig {
            default_cd_days: Some(45),
            store_path: Some("/tmp/from-file.json".into()),
            color: false,
        };
        assert_eq!(config.resolve_default_cd(&env, None), 45);
        assert_eq!(
            config.resolve_store_path(&env, None),
            PathBuf::from("/tmp/from-file.json")
        );
        assert_eq!(CliConfig::default().resolve_default_cd(&env, None), 30);
    }

    #[test]
    fn test_unreadable_env_default_falls_through_to_file() {
        std::env::set_var("HCDCLI_BADENV_DEFAULT_CD_DAYS", "thirty");
        let env = Config::for_profile("HCDCLI_BADENV");
        let config = CliConfig {
            default_cd_days: Some(45),
            store_path: None,
            color: true,
        };
        let resolved = config.resolve_default_cd(&env, None);
        std::env::remove_var("HCDCLI_BADENV_DEFAULT_CD_DAYS");

        // An exported unprefixed value that parses legitimately wins.
        if std::env::var("DEFAULT_CD_DAYS").is_err() {
            assert_eq!(resolved, 45);
        }
    }

    #[test]
    fn test_env_default_beats_file() {
        std::env::set_var("HCDCLI_GOODENV_DEFAULT_CD_DAYS", "21");
        let env = Config::for_profile("HCDCLI_GOODENV");
        let config = CliConfig {
            default_cd_days: Some(45),
            store_path: None,
            color: true,
        };
        let resolved = config.resolve_default_cd(&env, None);
        std::env::remove_var("HCDCLI_GOODENV_DEFAULT_CD_DAYS");
        assert_eq!(resolved, 21);
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("absent.toml");
        let config = CliConfig::load(path.to_str()).unwrap();
        assert_eq!(config.store_path, None);
    }

    #[test]
    fn test_load_partial_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "default_cd_days = 21\n").unwrap();
        let config = CliConfig::load(path.to_str()).unwrap();
        assert_eq!(config.default_cd_days, Some(21));
        assert!(config.color);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = CliConfig {
            default_cd_days: Some(14),
            store_path: Some("hotels.json".into()),
            color: false,
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: CliConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.default_cd_days, Some(14));
        assert!(!parsed.color);
    }
}
