//! Path and query-string parsing shared by the handlers. Every failure is a 400.

use crate::error::AppError;
use chrono::NaiveDate;
use std::collections::HashMap;

pub type QueryParams = HashMap<String, String>;

pub fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("El id debe ser un número entero: {}", raw)))
}

/// Boolean flag such as `?relations=true`. Absent or empty is false.
pub fn flag(params: &QueryParams, name: &str) -> Result<bool, AppError> {
    let Some(raw) = params.get(name) else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "0" | "no" | "off" => Ok(false),
        "true" | "1" | "yes" | "on" => Ok(true),
        _ => Err(AppError::Validation(format!(
            "El parámetro {} debe ser booleano: {}",
            name, raw
        ))),
    }
}

pub fn required_text<'a>(params: &'a QueryParams, name: &str) -> Result<&'a str, AppError> {
    params
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("El parámetro {} es obligatorio", name)))
}

pub fn required_i32(params: &QueryParams, name: &str) -> Result<i32, AppError> {
    let raw = required_text(params, name)?;
    raw.parse()
        .map_err(|_| AppError::Validation(format!("El parámetro {} debe ser un número entero: {}", name, raw)))
}

/// `YYYY-MM-DD`.
pub fn required_date(params: &QueryParams, name: &str) -> Result<NaiveDate, AppError> {
    let raw = required_text(params, name)?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::Validation(format!(
            "El parámetro {} debe ser una fecha con formato YYYY-MM-DD: {}",
            name, raw
        ))
    })
}

pub fn optional_i64(params: &QueryParams, name: &str) -> Result<Option<i64>, AppError> {
    match params.get(name).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|_| {
            AppError::Validation(format!("El parámetro {} debe ser un número entero: {}", name, raw))
        }),
    }
}
