//! Router assembly: operational routes at the root, doctor and patient routes under the API prefix.

mod common;
mod doctors;
mod patients;

pub use common::common_routes;
pub use doctors::doctor_routes;
pub use patients::patient_routes;

use crate::response::failure;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, http::StatusCode, response::IntoResponse, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

async fn route_not_found() -> impl IntoResponse {
    failure(StatusCode::NOT_FOUND, "Ruta no encontrada", Some("not_found"))
}

/// Full application router. An empty `api_prefix` mounts the API at the root.
pub fn app(state: AppState, api_prefix: &str) -> Router {
    let api = Router::new().merge(doctor_routes()).merge(patient_routes());
    let prefix = api_prefix.trim_end_matches('/');
    let api = if prefix.is_empty() {
        api
    } else {
        Router::new().nest(prefix, api)
    };

    Router::new()
        .merge(common_routes())
        .merge(api)
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
