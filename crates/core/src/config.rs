use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::entry::DEFAULT_CD_DAYS;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u32(profile: &str, key: &str, default: u32) -> u32 {
    profiled_env_opt(profile, key)
        .and_then(|v| crate::period::parse_period(&v))
        .unwrap_or(default)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    /// Cooldown stamped onto new entries.
    pub default_cd_days: u32,
    pub data_dir: PathBuf,
    /// JSON file holding the tracked entries.
    pub hotels_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = PathBuf::from("data");
        Self {
            profile: String::new(),
            default_cd_days: DEFAULT_CD_DAYS,
            hotels_file: data_dir.join("hotels.json"),
            data_dir,
        }
    }
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `HOTEL_CD_PROFILE`. When set (e.g. `TRAVEL`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("HOTEL_CD_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        let data_dir = PathBuf::from(profiled_env_or(p, "DATA_DIR", "data"));
        let hotels_file = profiled_env_opt(p, "HOTELS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("hotels.json"));
        Self {
            profile: p.to_string(),
            default_cd_days: profiled_env_u32(p, "DEFAULT_CD_DAYS", DEFAULT_CD_DAYS),
            data_dir,
            hotels_file,
        }
    }

    /// Whether `key` is explicitly set in the environment for this profile.
    pub fn is_set(&self, key: &str) -> bool {
        profiled_env_opt(&self.profile, key).is_some()
    }

    /// `DEFAULT_CD_DAYS` from the environment, only when it is set to a
    /// readable period.
    pub fn env_default_cd_days(&self) -> Option<u32> {
        profiled_env_opt(&self.profile, "DEFAULT_CD_DAYS")
            .and_then(|v| crate::period::parse_period(&v))
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  cooldown:    default_cd_days={}", self.default_cd_days);
        tracing::info!("  storage:     data_dir={}", self.data_dir.display());
        tracing::info!("  hotels:      file={}", self.hotels_file.display());
    }
}
