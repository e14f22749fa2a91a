//! Operational routes: liveness, readiness and build version, answered in the usual envelope.

use crate::error::AppError;
use crate::response::{failure, success_one_ok};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;

#[derive(Serialize)]
struct Probe {
    status: &'static str,
    database: Option<&'static str>,
}

#[derive(Serialize)]
struct Build {
    name: &'static str,
    version: &'static str,
}

async fn health() -> Response {
    let body = Probe {
        status: "ok",
        database: None,
    };
    success_one_ok(body, "Servicio activo").into_response()
}

/// 503 while the store does not answer a ping.
async fn ready(State(state): State<AppState>) -> Response {
    match state.health.ping().await {
        Ok(()) => {
            let body = Probe {
                status: "ok",
                database: Some("ok"),
            };
            success_one_ok(body, "Servicio listo").into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            failure(StatusCode::SERVICE_UNAVAILABLE, "Base de datos no disponible", Some(unready_code(&e))).into_response()
        }
    }
}

fn unready_code(e: &AppError) -> &'static str {
    match e {
        AppError::Storage(_) => "storage_unavailable",
        other => other.code(),
    }
}

async fn version() -> Response {
    let body = Build {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    };
    success_one_ok(body, "Versión del servicio").into_response()
}

/// GET /health, GET /ready (store ping), GET /version.
pub fn common_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Doctor, DoctorInput, DoctorPatientCount, DoctorPatientRow, DoctorSummary, Patient, PatientDoctorRow,
        PatientInput,
    };
    use crate::routes::app;
    use crate::store::{DoctorStore, PatientStore, StoreHealth};
    use crate::test_utils::send;
    use async_trait::async_trait;
    use axum::http::Method;
    use chrono::NaiveDate;
    use std::sync::Arc;

    /// Store whose every call fails as if the database were down.
    struct DownStore;

    fn down<T>() -> Result<T, AppError> {
        Err(AppError::Storage(sqlx::Error::PoolTimedOut))
    }

    #[async_trait]
    impl DoctorStore for DownStore {
        async fn list_all(&self) -> Result<Vec<Doctor>, AppError> {
            down()
        }
        async fn list_summaries(&self) -> Result<Vec<DoctorSummary>, AppError> {
            down()
        }
        async fn get_by_id(&self, _: i32) -> Result<Option<Doctor>, AppError> {
            down()
        }
        async fn get_with_patients(&self, _: i32) -> Result<Vec<DoctorPatientRow>, AppError> {
            down()
        }
        async fn find_by_specialty(&self, _: &str) -> Result<Vec<Doctor>, AppError> {
            down()
        }
        async fn find_by_age_range(&self, _: i32, _: i32) -> Result<Vec<Doctor>, AppError> {
            down()
        }
        async fn patient_counts(&self) -> Result<Vec<DoctorPatientCount>, AppError> {
            down()
        }
        async fn create(&self, _: &DoctorInput) -> Result<i32, AppError> {
            down()
        }
        async fn update(&self, _: i32, _: &DoctorInput) -> Result<u64, AppError> {
            down()
        }
        async fn delete(&self, _: i32) -> Result<u64, AppError> {
            down()
        }
        async fn exists(&self, _: i32) -> Result<bool, AppError> {
            down()
        }
    }

    #[async_trait]
    impl PatientStore for DownStore {
        async fn list_all(&self) -> Result<Vec<Patient>, AppError> {
            down()
        }
        async fn get_by_id(&self, _: i32) -> Result<Option<Patient>, AppError> {
            down()
        }
        async fn get_with_doctor(&self, _: i32) -> Result<Option<PatientDoctorRow>, AppError> {
            down()
        }
        async fn count(&self) -> Result<i64, AppError> {
            down()
        }
        async fn list_window(&self, _: i64, _: i64) -> Result<Vec<Patient>, AppError> {
            down()
        }
        async fn find_by_birth_date_range(&self, _: NaiveDate, _: NaiveDate) -> Result<Vec<Patient>, AppError> {
            down()
        }
        async fn create(&self, _: &PatientInput) -> Result<i32, AppError> {
            down()
        }
        async fn update(&self, _: i32, _: &PatientInput) -> Result<u64, AppError> {
            down()
        }
        async fn delete(&self, _: i32) -> Result<u64, AppError> {
            down()
        }
        async fn exists(&self, _: i32) -> Result<bool, AppError> {
            down()
        }
    }

    #[async_trait]
    impl StoreHealth for DownStore {
        async fn ping(&self) -> Result<(), AppError> {
            down()
        }
    }

    #[tokio::test]
    async fn unreachable_store_is_not_ready() {
        let app = app(AppState::new(Arc::new(DownStore)), "/api");
        let (status, body) = send(&app, Method::GET, "/ready", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"], "storage_unavailable");

        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["datos"]["status"], "ok");
    }

    #[tokio::test]
    async fn storage_failure_on_api_route_is_generic_500() {
        let app = app(AppState::new(Arc::new(DownStore)), "/api");
        let (status, body) = send(&app, Method::GET, "/api/doctors", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["mensaje"], "Error interno del servidor");
        assert_eq!(body["error"], "storage_error");
    }
}
