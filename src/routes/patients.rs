use crate::handlers::patients::{create, delete, list, read, search_by_birth_date, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn patient_routes() -> Router<AppState> {
    Router::new()
        .route("/patients", get(list).post(create))
        .route("/patients/search-date", get(search_by_birth_date))
        .route("/patients/:id", get(read).put(update).delete(delete))
}
