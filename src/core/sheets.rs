use crate::config::SheetsConfig;
use crate::core::{status_text, Row, RowSource};
use crate::utils::error::{FlagshipError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

/// Response body of `spreadsheets.values.get`.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Option<Vec<Vec<SheetCell>>>,
}

/// The values API hands back formatted strings, but unformatted renders
/// carry raw numbers and booleans.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SheetCell {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    Empty(()),
}

impl SheetCell {
    fn into_string(self) -> String {
        match self {
            SheetCell::Text(s) => s,
            SheetCell::Number(n) => n.to_string(),
            SheetCell::Bool(b) => b.to_string(),
            SheetCell::Empty(()) => String::new(),
        }
    }
}

pub struct SheetsClient {
    config: SheetsConfig,
    client: Client,
}

impl SheetsClient {
    pub fn new(config: SheetsConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: SheetsConfig, client: Client) -> Self {
        Self { config, client }
    }

    pub fn request_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.config.api_base).map_err(|e| {
            FlagshipError::InvalidConfigValueError {
                field: "api_base".to_string(),
                value: self.config.api_base.clone(),
                reason: e.to_string(),
            }
        })?;

        url.path_segments_mut()
            .map_err(|_| FlagshipError::config("api_base cannot carry a path"))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                &self.config.spreadsheet_id,
                "values",
                &self.config.range,
            ]);
        url.query_pairs_mut().append_pair("key", &self.config.api_key);

        Ok(url)
    }

    /// Same URL with the API key masked, for error messages and logs.
    fn redacted_url(&self, url: &Url) -> String {
        let mut redacted = url.clone();
        redacted.set_query(Some("key=REDACTED"));
        redacted.to_string()
    }

    pub async fn fetch_rows(&self) -> Result<Vec<Row>> {
        let url = self.request_url()?;
        tracing::debug!(url = %self.redacted_url(&url), "fetching sheet values");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            let status_text = status_text(&response);
            let body = response.text().await.unwrap_or_default();
            return Err(FlagshipError::SheetsApiError {
                status: status.as_u16(),
                status_text,
                url: self.redacted_url(&url),
                range: self.config.range.clone(),
                body,
            });
        }

        let data: ValueRange = response.json().await?;
        let values = data
            .values
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.into_iter().map(SheetCell::into_string).collect())
            .collect();

        let rows = rows_from_values(values);
        tracing::debug!(rows = rows.len(), "sheet values parsed");
        Ok(rows)
    }
}

#[async_trait]
impl RowSource for SheetsClient {
    async fn fetch_rows(&self) -> Result<Vec<Row>> {
        SheetsClient::fetch_rows(self).await
    }
}

/// Zips every data row against the header row.
///
/// Short rows are padded with empty strings; cells past the last header are
/// dropped. No values at all means no rows.
pub fn rows_from_values(values: Vec<Vec<String>>) -> Vec<Row> {
    let mut lines = values.into_iter();
    let Some(header) = lines.next() else {
        return Vec::new();
    };

    lines
        .map(|cells| {
            header
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), cells.get(i).cloned().unwrap_or_default()))
                .collect()
        })
        .collect()
}
