#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::range::normalize_range;
use crate::utils::error::{FlagshipError, Result};
use crate::utils::validation::{require_non_empty, validate_range, validate_url, Validate};
use std::path::PathBuf;
use std::time::Duration;

pub use toml_config::FileConfig;

pub const ENV_SHEETS_ID: &str = "GOOGLE_SHEETS_ID";
pub const ENV_SHEETS_API_KEY: &str = "GOOGLE_SHEETS_API_KEY";
pub const ENV_SHEETS_RANGE: &str = "GOOGLE_SHEETS_RANGE";
pub const ENV_SHEETS_API_BASE: &str = "GOOGLE_SHEETS_API_BASE";
pub const ENV_PORT: &str = "FLAGSHIP_PORT";
pub const ENV_REVALIDATE_SECS: &str = "FLAGSHIP_REVALIDATE_SECS";
pub const ENV_SELECTION_DIR: &str = "FLAGSHIP_SELECTION_DIR";
pub const ENV_PRERENDER: &str = "FLAGSHIP_PRERENDER";

pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_REVALIDATE_SECS: u64 = 300;

/// Where the partner sheet lives. Built once at startup; the range is
/// already normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub api_key: String,
    pub range: String,
    pub api_base: String,
}

impl SheetsConfig {
    pub fn new(spreadsheet_id: &str, api_key: &str, range: &str) -> Result<Self> {
        Ok(Self {
            spreadsheet_id: require_non_empty(ENV_SHEETS_ID, Some(spreadsheet_id))?,
            api_key: require_non_empty(ENV_SHEETS_API_KEY, Some(api_key))?,
            range: normalize_range(&require_non_empty(ENV_SHEETS_RANGE, Some(range))?)?,
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    pub fn with_api_base(mut self, api_base: &str) -> Result<Self> {
        let api_base = api_base.trim().trim_end_matches('/');
        validate_url(ENV_SHEETS_API_BASE, api_base)?;
        self.api_base = api_base.to_string();
        Ok(self)
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let id = require_non_empty(ENV_SHEETS_ID, lookup(ENV_SHEETS_ID).as_deref())?;
        let key = require_non_empty(ENV_SHEETS_API_KEY, lookup(ENV_SHEETS_API_KEY).as_deref())?;
        let range = require_non_empty(ENV_SHEETS_RANGE, lookup(ENV_SHEETS_RANGE).as_deref())?;

        let config = Self::new(&id, &key, &range)?;
        match lookup(ENV_SHEETS_API_BASE).filter(|v| !v.trim().is_empty()) {
            Some(base) => config.with_api_base(&base),
            None => Ok(config),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub revalidate_secs: u64,
    pub prerender: bool,
    pub selection_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            revalidate_secs: DEFAULT_REVALIDATE_SECS,
            prerender: true,
            selection_dir: None,
        }
    }
}

impl ServerConfig {
    pub fn revalidate_after(&self) -> Duration {
        Duration::from_secs(self.revalidate_secs)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(port) = lookup(ENV_PORT) {
            config.port = parse_value(ENV_PORT, &port)?;
        }
        if let Some(secs) = lookup(ENV_REVALIDATE_SECS) {
            config.revalidate_secs = parse_value(ENV_REVALIDATE_SECS, &secs)?;
        }
        if let Some(prerender) = lookup(ENV_PRERENDER) {
            config.prerender = parse_value(ENV_PRERENDER, &prerender)?;
        }
        if let Some(dir) = lookup(ENV_SELECTION_DIR).filter(|d| !d.trim().is_empty()) {
            config.selection_dir = Some(PathBuf::from(dir.trim()));
        }
        Ok(config)
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validate_range("port", self.port, 1, u16::MAX)?;
        validate_range("revalidate_secs", self.revalidate_secs, 0, 86_400)?;
        if let Some(dir) = &self.selection_dir {
            let raw = dir.to_string_lossy();
            if raw.is_empty() || raw.contains('\0') {
                return Err(FlagshipError::InvalidConfigValueError {
                    field: "selection_dir".to_string(),
                    value: raw.into_owned(),
                    reason: "must be a non-empty path".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| FlagshipError::InvalidConfigValueError {
            field: field.to_string(),
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

/// Everything the binary needs, resolved from (in increasing priority) the
/// environment and an optional TOML file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub sheets: SheetsConfig,
    pub server: ServerConfig,
}

impl Settings {
    pub fn load(file: Option<&FileConfig>) -> Result<Self> {
        Self::load_with(file, |key| std::env::var(key).ok())
    }

    pub fn load_with<F>(file: Option<&FileConfig>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let merged = |key: &str| file.and_then(|f| f.lookup(key)).or_else(|| lookup(key));

        let settings = Self {
            sheets: SheetsConfig::from_lookup(&merged)?,
            server: ServerConfig::from_lookup(&merged)?,
        };
        settings.validate()?;

        tracing::debug!(
            range = %settings.sheets.range,
            api_base = %settings.sheets.api_base,
            "configuration loaded"
        );
        Ok(settings)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("api_base", &self.sheets.api_base)?;
        self.server.validate()
    }
}
