use crate::utils::error::{FlagshipError, Result};
use regex::Regex;
use std::sync::LazyLock;

static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^!]+)!(.+)$").expect("range pattern is valid")
});

/// Normalizes an A1 range of the form `<tab>!<cells>`.
///
/// The tab name is wrapped in single quotes when it holds anything outside
/// `[A-Za-z0-9_]` and is not already quoted. The cell part is kept verbatim.
pub fn normalize_range(raw_range: &str) -> Result<String> {
    let caps = RANGE_RE.captures(raw_range.trim()).ok_or_else(|| {
        FlagshipError::config(format!(
            "GOOGLE_SHEETS_RANGE must look like <tab>!A1:Z1000, got {:?}",
            raw_range
        ))
    })?;

    let tab = &caps[1];
    let cells = &caps[2];

    if needs_quoting(tab) {
        Ok(format!("'{}'!{}", tab, cells))
    } else {
        Ok(format!("{}!{}", tab, cells))
    }
}

fn needs_quoting(tab: &str) -> bool {
    !tab.starts_with('\'') && tab.chars().any(|c| !(c.is_ascii_alphanumeric() || c == '_'))
}
