//! Patient handlers: paginated list, lookup, date search, create, update, delete.

use crate::error::AppError;
use crate::extractors::{BodyJson, PathId};
use crate::handlers::params::{flag, optional_i64, required_date, QueryParams};
use crate::model::{PatientInput, PatientPage};
use crate::response::{success_created, success_empty, success_many, success_one_ok};
use crate::service::{PageRequest, UpdateOutcome};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Paged by default; `?listado=true` returns every patient in one list.
pub async fn list(State(state): State<AppState>, Query(params): Query<QueryParams>) -> Result<Response, AppError> {
    if flag(&params, "listado")? {
        let rows = state.patients.list_all().await?;
        return Ok(success_many(rows, "Listado de pacientes recuperado").into_response());
    }
    let request = PageRequest::new(optional_i64(&params, "page")?, optional_i64(&params, "limit")?);
    let page = state.patients.list_page(request).await?;
    let mensaje = format!("Listado de pacientes recuperado (página {})", page.page);
    let body = PatientPage {
        pacientes: page.items,
        total: page.total,
        total_pages: page.total_pages,
        pagina: page.page,
        limite: page.limit,
    };
    Ok(success_one_ok(body, mensaje).into_response())
}

/// `?relations=true` nests the assigned doctor (null when unassigned).
pub async fn read(
    State(state): State<AppState>,
    PathId(id): PathId,
    Query(params): Query<QueryParams>,
) -> Result<Response, AppError> {
    if flag(&params, "relations")? {
        let patient = state.patients.get_with_doctor(id).await?;
        return Ok(success_one_ok(patient, "Paciente recuperado con su médico").into_response());
    }
    let patient = state.patients.get(id).await?;
    Ok(success_one_ok(patient, "Paciente recuperado").into_response())
}

pub async fn search_by_birth_date(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Response, AppError> {
    let start = required_date(&params, "startDate")?;
    let end = required_date(&params, "endDate")?;
    let rows = state.patients.search_by_birth_date(start, end).await?;
    Ok(success_many(rows, format!("Pacientes nacidos entre {} y {} recuperados", start, end)).into_response())
}

pub async fn create(State(state): State<AppState>, BodyJson(input): BodyJson<PatientInput>) -> Result<Response, AppError> {
    let patient = state.patients.create(input).await?;
    Ok(success_created(patient, "Paciente creado correctamente").into_response())
}

pub async fn update(
    State(state): State<AppState>,
    PathId(id): PathId,
    BodyJson(input): BodyJson<PatientInput>,
) -> Result<Response, AppError> {
    let mensaje = match state.patients.update(id, input).await? {
        UpdateOutcome::Changed => "Paciente editado correctamente",
        UpdateOutcome::Unchanged => "Paciente editado correctamente (sin cambios)",
    };
    Ok(success_empty(mensaje).into_response())
}

pub async fn delete(State(state): State<AppState>, PathId(id): PathId) -> Result<Response, AppError> {
    state.patients.delete(id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
