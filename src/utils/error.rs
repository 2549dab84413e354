use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlagshipError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Google Sheets API error: {status} {status_text}\nURL: {url}\nRange: {range}\nBody: {body}")]
    SheetsApiError {
        status: u16,
        status_text: String,
        url: String,
        range: String,
        body: String,
    },

    #[error("Upstream error: {status} {status_text}\n{body}")]
    WebhookError {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("Missing formAction")]
    MissingFormAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Upstream,
    Validation,
    Unexpected,
}

impl FlagshipError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FlagshipError::ConfigError { .. }
            | FlagshipError::MissingConfigError { .. }
            | FlagshipError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            FlagshipError::SheetsApiError { .. } | FlagshipError::WebhookError { .. } => {
                ErrorCategory::Upstream
            }
            FlagshipError::MissingFormAction => ErrorCategory::Validation,
            FlagshipError::HttpError(_)
            | FlagshipError::IoError(_)
            | FlagshipError::SerializationError(_) => ErrorCategory::Unexpected,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        FlagshipError::ConfigError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FlagshipError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_error_message_carries_status_line_and_body() {
        let err = FlagshipError::WebhookError {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: "boom".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Upstream error: 500 Internal Server Error\nboom"
        );
        assert_eq!(err.category(), ErrorCategory::Upstream);
    }

    #[test]
    fn test_config_errors_share_a_category() {
        assert_eq!(
            FlagshipError::config("bad").category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            FlagshipError::MissingConfigError {
                field: "GOOGLE_SHEETS_ID".to_string()
            }
            .category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            FlagshipError::MissingFormAction.category(),
            ErrorCategory::Validation
        );
    }
}
