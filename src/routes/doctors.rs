use crate::handlers::doctors::{create, delete, graph, list, read, search_by_age, search_by_specialty, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn doctor_routes() -> Router<AppState> {
    Router::new()
        .route("/doctors", get(list).post(create))
        .route("/doctors/search", get(search_by_specialty))
        .route("/doctors/search-age", get(search_by_age))
        .route("/doctors/graph", get(graph))
        .route("/doctors/:id", get(read).put(update).delete(delete))
}
