//! Flat rows produced by the LEFT JOIN queries. Columns of the optional side are all nullable.

use chrono::NaiveDate;
use sqlx::FromRow;

/// `doctor LEFT JOIN patient`: one row per patient, or a single row with null `p_*` columns.
#[derive(Clone, Debug, PartialEq, FromRow)]
pub struct DoctorPatientRow {
    pub d_id: i32,
    pub d_name: String,
    pub d_surname: String,
    pub d_specialty: String,
    pub d_email: String,
    pub d_phone: String,
    pub d_age: Option<i32>,
    pub d_salary: Option<f64>,
    pub d_active: Option<bool>,
    pub p_id: Option<i32>,
    pub p_name: Option<String>,
    pub p_surname: Option<String>,
    pub p_birth_date: Option<NaiveDate>,
    pub p_email: Option<String>,
    pub p_phone: Option<String>,
}

/// `patient LEFT JOIN doctor`: exactly one row per patient.
#[derive(Clone, Debug, PartialEq, FromRow)]
pub struct PatientDoctorRow {
    pub p_id: i32,
    pub p_name: String,
    pub p_surname: String,
    pub p_birth_date: NaiveDate,
    pub p_email: String,
    pub p_phone: String,
    pub p_doctor_id: Option<i32>,
    pub d_id: Option<i32>,
    pub d_name: Option<String>,
    pub d_surname: Option<String>,
    pub d_specialty: Option<String>,
    pub d_email: Option<String>,
    pub d_phone: Option<String>,
    pub d_age: Option<i32>,
    pub d_salary: Option<f64>,
    pub d_active: Option<bool>,
}
