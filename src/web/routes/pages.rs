use axum::{
    extract::{Path, State},
    http::{header::CACHE_CONTROL, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::core::signage::{load_selection, storage_key};
use crate::core::Business;
use crate::web::{render, state::AppState};

pub async fn home() -> Html<String> {
    Html(render::render_home())
}

pub async fn flagship(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match state.resolve_page(&slug).await {
        Ok(Some(row)) => {
            let business = Business::from(&row);
            let selection = load_selection(
                state.selections.as_ref(),
                &storage_key(&business.business_name),
            )
            .await;

            (
                StatusCode::OK,
                [(CACHE_CONTROL, state.cache_control())],
                Html(render::render_landing(&business, &selection)),
            )
                .into_response()
        }
        Ok(None) => {
            tracing::info!(slug = %slug, "no flagship row for slug");
            (StatusCode::NOT_FOUND, Html(render::render_not_found())).into_response()
        }
        Err(e) => {
            tracing::error!(slug = %slug, error = %e, category = ?e.category(), "failed to resolve flagship page");
            (StatusCode::INTERNAL_SERVER_ERROR, Html(render::render_error())).into_response()
        }
    }
}
