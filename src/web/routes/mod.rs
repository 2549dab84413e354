mod health;
mod pages;
mod selection;
mod submit;

use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::web::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(pages::home))
        .route("/flagship/{slug}", get(pages::flagship))
        .route("/api/submit", post(submit::submit))
        .route("/api/selection/{slug}", post(selection::save))
        .route("/healthz", get(health::healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
