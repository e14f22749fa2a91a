//! Fixtures and an in-process HTTP client for unit tests.

use crate::model::{DoctorInput, PatientInput};
use crate::routes::app;
use crate::state::AppState;
use crate::store::memory::MemoryStore;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
}

pub fn sample_doctor(name: &str, specialty: &str, age: Option<i32>) -> DoctorInput {
    DoctorInput {
        name: name.to_string(),
        surname: "García".into(),
        specialty: specialty.to_string(),
        email: format!("{}@clinic.test", name.to_lowercase()),
        phone: "600111222".into(),
        age,
        salary: Some(3200.0),
        active: Some(true),
    }
}

pub fn sample_patient(name: &str, birth_date: &str, doctor_id: Option<i32>) -> PatientInput {
    PatientInput {
        name: name.to_string(),
        surname: "Pérez".into(),
        birth_date: date(birth_date),
        email: format!("{}@mail.test", name.to_lowercase()),
        phone: "600123123".into(),
        doctor_id,
    }
}

/// Router over a fresh in-memory store, mounted under `/api`.
pub fn memory_app() -> Router {
    app(AppState::new(Arc::new(MemoryStore::new())), "/api")
}

/// Send one request; an empty body decodes as `Value::Null`.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    if bytes.is_empty() {
        return (status, Value::Null);
    }
    (status, serde_json::from_slice(&bytes).expect("json body"))
}
