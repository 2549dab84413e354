use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::core::signage::{save_selection, storage_key, SignageSelection};
use crate::core::Business;
use crate::web::{error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct SelectionUpdate {
    #[serde(default)]
    pub selected: Vec<String>,
}

/// Remembers the signage picked on a partner page. Only slugs present in the
/// sheet are accepted and ids outside the catalog are dropped, so the store
/// holds at most one entry per partner.
pub async fn save(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(update): Json<SelectionUpdate>,
) -> Result<StatusCode, ApiError> {
    let Some(row) = state.resolve_page(&slug).await? else {
        return Ok(StatusCode::NOT_FOUND);
    };

    let business = Business::from(&row);
    let selection = SignageSelection::from_catalog(update.selected);
    tracing::debug!(slug = %slug, selected = selection.len(), "saving signage selection");
    save_selection(
        state.selections.as_ref(),
        &storage_key(&business.business_name),
        &selection,
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
