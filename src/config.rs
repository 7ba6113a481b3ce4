//! Configuration
//!
//! - `EngineConfig`: where to load table overrides from (built-ins otherwise)
//! - `ServerConfig`: HTTP server settings read from the environment
//!
//! Invalid environment values log a warning and fall back to the default.

use std::env;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use tracing::{info, warn};

use crate::tables::GLOBAL_COUNTRY_CODE;

pub const QUESTIONS_FILE: &str = "questions.json";
pub const COUNTRIES_FILE: &str = "countries.json";
pub const TIPS_FILE: &str = "tips.json";

/// IP-to-country endpoint used when `COUNTRY_LOOKUP_URL` is not set
pub const DEFAULT_COUNTRY_LOOKUP_URL: &str = "https://ipapi.co/{ip}/json/";

/// Optional JSON overrides for the static tables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    pub questions_path: Option<PathBuf>,
    pub countries_path: Option<PathBuf>,
    pub tips_path: Option<PathBuf>,
}

impl EngineConfig {
    /// Built-in tables only
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Pick up whichever of `questions.json`, `countries.json` and `tips.json`
    /// exist in `dir`
    pub fn from_data_dir(dir: &Path) -> Self {
        let existing = |name: &str| {
            let path = dir.join(name);
            if path.is_file() {
                info!("Using table override {:?}", path);
                Some(path)
            } else {
                None
            }
        };

        Self {
            questions_path: existing(QUESTIONS_FILE),
            countries_path: existing(COUNTRIES_FILE),
            tips_path: existing(TIPS_FILE),
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub data_dir: Option<PathBuf>,
    pub snapshot_capacity: u64,
    /// `None` keeps snapshots until evicted by capacity
    pub snapshot_ttl: Option<Duration>,
    /// `{ip}` template for the remote lookup; `None` disables it
    pub country_lookup_url: Option<String>,
    pub country_lookup_timeout: Duration,
    pub default_country: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            data_dir: None,
            snapshot_capacity: 10_000,
            snapshot_ttl: None,
            country_lookup_url: Some(DEFAULT_COUNTRY_LOOKUP_URL.to_string()),
            country_lookup_timeout: Duration::from_millis(1500),
            default_country: GLOBAL_COUNTRY_CODE.to_string(),
        }
    }
}

impl ServerConfig {
    /// Read settings from process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let ttl_secs: u64 = try_load(&lookup, "SNAPSHOT_TTL_SECS", 0);
        let timeout_ms: u64 = try_load(
            &lookup,
            "COUNTRY_LOOKUP_TIMEOUT_MS",
            defaults.country_lookup_timeout.as_millis() as u64,
        );
        let default_country: String =
            try_load(&lookup, "DEFAULT_COUNTRY", defaults.default_country.clone());

        Self {
            port: try_load(&lookup, "PORT", defaults.port),
            data_dir: lookup("DATA_DIR")
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from),
            snapshot_capacity: try_load(&lookup, "SNAPSHOT_CAPACITY", defaults.snapshot_capacity),
            snapshot_ttl: (ttl_secs > 0).then(|| Duration::from_secs(ttl_secs)),
            // Set but empty turns the lookup off
            country_lookup_url: match lookup("COUNTRY_LOOKUP_URL") {
                Some(url) if url.trim().is_empty() => None,
                Some(url) => Some(url.trim().to_string()),
                None => defaults.country_lookup_url,
            },
            country_lookup_timeout: Duration::from_millis(timeout_ms),
            default_country: default_country.trim().to_ascii_uppercase(),
        }
    }

    /// Table overrides implied by `data_dir`
    pub fn engine_config(&self) -> EngineConfig {
        match &self.data_dir {
            Some(dir) => EngineConfig::from_data_dir(dir),
            None => EngineConfig::builtin(),
        }
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value '{raw}': {e}, using default: {default}");
            default
        }),
    }
}
