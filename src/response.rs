//! Standard response envelope helpers.
//!
//! Every JSON body has the shape `{ ok, datos, mensaje }`; failures also carry an `error` code.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub ok: bool,
    pub datos: Option<T>,
    pub mensaje: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn success_one_ok<T: Serialize>(datos: T, mensaje: impl Into<String>) -> (StatusCode, Json<Envelope<T>>) {
    (
        StatusCode::OK,
        Json(Envelope {
            ok: true,
            datos: Some(datos),
            mensaje: mensaje.into(),
            error: None,
        }),
    )
}

pub fn success_created<T: Serialize>(datos: T, mensaje: impl Into<String>) -> (StatusCode, Json<Envelope<T>>) {
    (
        StatusCode::CREATED,
        Json(Envelope {
            ok: true,
            datos: Some(datos),
            mensaje: mensaje.into(),
            error: None,
        }),
    )
}

pub fn success_many<T: Serialize>(datos: Vec<T>, mensaje: impl Into<String>) -> (StatusCode, Json<Envelope<Vec<T>>>) {
    success_one_ok(datos, mensaje)
}

/// 200 with `datos: null`, used by updates.
pub fn success_empty(mensaje: impl Into<String>) -> (StatusCode, Json<Envelope<()>>) {
    (
        StatusCode::OK,
        Json(Envelope {
            ok: true,
            datos: None,
            mensaje: mensaje.into(),
            error: None,
        }),
    )
}

pub fn failure(status: StatusCode, mensaje: impl Into<String>, code: Option<&str>) -> (StatusCode, Json<Envelope<()>>) {
    (
        status,
        Json(Envelope {
            ok: false,
            datos: None,
            mensaje: mensaje.into(),
            error: code.map(str::to_string),
        }),
    )
}
