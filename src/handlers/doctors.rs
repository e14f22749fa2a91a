//! Doctor handlers: list, lookup, search, graph, create, update, delete.

use crate::error::AppError;
use crate::extractors::{BodyJson, PathId};
use crate::handlers::params::{flag, required_i32, required_text, QueryParams};
use crate::model::DoctorInput;
use crate::response::{success_created, success_empty, success_many, success_one_ok};
use crate::service::UpdateOutcome;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// `?listado=true` returns the reduced projection.
pub async fn list(State(state): State<AppState>, Query(params): Query<QueryParams>) -> Result<Response, AppError> {
    if flag(&params, "listado")? {
        let rows = state.doctors.list_summaries().await?;
        return Ok(success_many(rows, "Listado de médicos recuperado").into_response());
    }
    let rows = state.doctors.list_all().await?;
    Ok(success_many(rows, "Datos de médicos recuperados").into_response())
}

/// `?relations=true` nests the doctor's patients.
pub async fn read(
    State(state): State<AppState>,
    PathId(id): PathId,
    Query(params): Query<QueryParams>,
) -> Result<Response, AppError> {
    if flag(&params, "relations")? {
        let doctor = state.doctors.get_with_patients(id).await?;
        return Ok(success_one_ok(doctor, "Médico recuperado con pacientes").into_response());
    }
    let doctor = state.doctors.get(id).await?;
    Ok(success_one_ok(doctor, "Médico recuperado").into_response())
}

pub async fn search_by_specialty(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Response, AppError> {
    let specialty = required_text(&params, "specialty")?;
    let rows = state.doctors.search_by_specialty(specialty).await?;
    Ok(success_many(rows, format!("Médicos con especialidad {} recuperados", specialty)).into_response())
}

pub async fn search_by_age(State(state): State<AppState>, Query(params): Query<QueryParams>) -> Result<Response, AppError> {
    let min_age = required_i32(&params, "minAge")?;
    let max_age = required_i32(&params, "maxAge")?;
    let rows = state.doctors.search_by_age(min_age, max_age).await?;
    Ok(success_many(rows, format!("Médicos entre {} y {} años recuperados", min_age, max_age)).into_response())
}

pub async fn graph(State(state): State<AppState>) -> Result<Response, AppError> {
    let points = state.doctors.patient_graph().await?;
    Ok(success_many(points, "Datos para la gráfica recuperados").into_response())
}

pub async fn create(State(state): State<AppState>, BodyJson(input): BodyJson<DoctorInput>) -> Result<Response, AppError> {
    let doctor = state.doctors.create(input).await?;
    Ok(success_created(doctor, "Médico creado correctamente").into_response())
}

pub async fn update(
    State(state): State<AppState>,
    PathId(id): PathId,
    BodyJson(input): BodyJson<DoctorInput>,
) -> Result<Response, AppError> {
    let mensaje = match state.doctors.update(id, input).await? {
        UpdateOutcome::Changed => "Médico editado correctamente",
        UpdateOutcome::Unchanged => "Médico editado correctamente (sin cambios)",
    };
    Ok(success_empty(mensaje).into_response())
}

pub async fn delete(State(state): State<AppState>, PathId(id): PathId) -> Result<Response, AppError> {
    state.doctors.delete(id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
