use crate::core::status_text;
use crate::utils::error::{FlagshipError, Result};
use reqwest::Client;
use serde_json::{Map, Value};

pub const FORM_ACTION_FIELD: &str = "formAction";

/// A validated form submission: the webhook to call and what to send it.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub form_action: String,
    pub fields: Map<String, Value>,
}

impl Submission {
    /// Splits `formAction` off the payload. It must be a non-empty string.
    pub fn from_payload(mut payload: Map<String, Value>) -> Result<Self> {
        match payload.remove(FORM_ACTION_FIELD) {
            Some(Value::String(form_action)) if !form_action.is_empty() => Ok(Self {
                form_action,
                fields: payload,
            }),
            _ => Err(FlagshipError::MissingFormAction),
        }
    }
}

/// Reads the request body as a JSON object. Anything else, including
/// invalid JSON, counts as an empty object.
pub fn parse_or_default(body: &[u8]) -> Map<String, Value> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        Ok(_) | Err(_) => Map::new(),
    }
}

/// Relays interest forms to the partner webhook named in the form itself.
/// No timeout and no retry; the visitor can resubmit.
#[derive(Clone, Default)]
pub struct SubmissionProxy {
    client: Client,
}

impl SubmissionProxy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub async fn submit(&self, body: &[u8]) -> Result<()> {
        let submission = Submission::from_payload(parse_or_default(body))?;
        self.forward(&submission).await
    }

    pub async fn forward(&self, submission: &Submission) -> Result<()> {
        tracing::debug!(
            fields = submission.fields.len(),
            "forwarding submission to webhook"
        );

        let upstream = self
            .client
            .post(submission.form_action.as_str())
            .json(&submission.fields)
            .send()
            .await?;

        let status = upstream.status();
        if !status.is_success() {
            let status_text = status_text(&upstream);
            let body = upstream.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "webhook rejected submission");
            return Err(FlagshipError::WebhookError {
                status: status.as_u16(),
                status_text,
                body,
            });
        }

        tracing::info!(status = status.as_u16(), "submission forwarded");
        Ok(())
    }
}
