use axum::{body::Bytes, extract::State, Json};
use serde_json::{json, Value};

use crate::web::{error::ApiError, state::AppState};

/// Raw bytes rather than `Json<_>` so an unparsable body still reaches the
/// parse-or-default step instead of being rejected by the extractor.
pub async fn submit(State(state): State<AppState>, body: Bytes) -> Result<Json<Value>, ApiError> {
    state.proxy.submit(&body).await?;
    Ok(Json(json!({ "ok": true })))
}
