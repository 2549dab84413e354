use crate::utils::error::FlagshipError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// The only place library errors become HTTP statuses for the `/api` routes.
#[derive(Debug)]
pub struct ApiError(pub FlagshipError);

impl From<FlagshipError> for ApiError {
    fn from(e: FlagshipError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            FlagshipError::MissingFormAction => (StatusCode::BAD_REQUEST, self.0.to_string()),
            // Upstream detail is passed through.
            FlagshipError::WebhookError { .. } => (StatusCode::BAD_GATEWAY, self.0.to_string()),
            other => {
                tracing::error!(error = %other, category = ?other.category(), "api request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unexpected error".to_string(),
                )
            }
        };

        (status, body).into_response()
    }
}
