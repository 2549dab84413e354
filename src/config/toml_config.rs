use crate::config::{
    ENV_PORT, ENV_PRERENDER, ENV_REVALIDATE_SECS, ENV_SELECTION_DIR, ENV_SHEETS_API_BASE,
    ENV_SHEETS_API_KEY, ENV_SHEETS_ID, ENV_SHEETS_RANGE,
};
use crate::utils::error::{FlagshipError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// Optional on-disk configuration. Every value may be omitted, in which case
/// the environment is consulted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub sheets: SheetsSection,
    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetsSection {
    pub spreadsheet_id: Option<String>,
    pub api_key: Option<String>,
    pub range: Option<String>,
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub port: Option<u16>,
    pub revalidate_secs: Option<u64>,
    pub prerender: Option<bool>,
    pub selection_dir: Option<String>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| FlagshipError::InvalidConfigValueError {
            field: "toml".to_string(),
            value: String::new(),
            reason: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${NAME}` with the environment value. Unknown names are left
    /// untouched so the resulting error points at the placeholder.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// Looks a setting up by its environment variable name.
    pub fn lookup(&self, key: &str) -> Option<String> {
        match key {
            ENV_SHEETS_ID => self.sheets.spreadsheet_id.clone(),
            ENV_SHEETS_API_KEY => self.sheets.api_key.clone(),
            ENV_SHEETS_RANGE => self.sheets.range.clone(),
            ENV_SHEETS_API_BASE => self.sheets.api_base.clone(),
            ENV_PORT => self.server.port.map(|p| p.to_string()),
            ENV_REVALIDATE_SECS => self.server.revalidate_secs.map(|s| s.to_string()),
            ENV_PRERENDER => self.server.prerender.map(|p| p.to_string()),
            ENV_SELECTION_DIR => self.server.selection_dir.clone(),
            _ => None,
        }
    }
}
