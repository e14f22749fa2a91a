//! Data access layer: one trait per table plus the PostgreSQL implementation.
//!
//! Stores return raw results (rows, flat join rows, affected-row counts). Turning those into
//! API outcomes (not found, no-op updates, nested relations) is the service layer's job.

#[cfg(test)]
pub mod memory;
mod postgres;
mod schema;

pub use postgres::PgStore;
pub use schema::{ensure_database_exists, ensure_tables};

use crate::error::AppError;
use crate::model::{
    Doctor, DoctorInput, DoctorPatientCount, DoctorPatientRow, DoctorSummary, Patient, PatientDoctorRow,
    PatientInput,
};
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait DoctorStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Doctor>, AppError>;

    /// Reduced projection: id, name, surname, specialty.
    async fn list_summaries(&self) -> Result<Vec<DoctorSummary>, AppError>;

    async fn get_by_id(&self, id: i32) -> Result<Option<Doctor>, AppError>;

    /// Flat `doctor LEFT JOIN patient` rows; empty when the doctor does not exist.
    async fn get_with_patients(&self, id: i32) -> Result<Vec<DoctorPatientRow>, AppError>;

    async fn find_by_specialty(&self, specialty: &str) -> Result<Vec<Doctor>, AppError>;

    /// Doctors whose age lies in `[min_age, max_age]`.
    async fn find_by_age_range(&self, min_age: i32, max_age: i32) -> Result<Vec<Doctor>, AppError>;

    async fn patient_counts(&self) -> Result<Vec<DoctorPatientCount>, AppError>;

    /// Returns the generated id.
    async fn create(&self, input: &DoctorInput) -> Result<i32, AppError>;

    /// Returns the number of rows whose values actually changed.
    async fn update(&self, id: i32, input: &DoctorInput) -> Result<u64, AppError>;

    async fn delete(&self, id: i32) -> Result<u64, AppError>;

    async fn exists(&self, id: i32) -> Result<bool, AppError>;
}

#[async_trait]
pub trait PatientStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Patient>, AppError>;

    async fn get_by_id(&self, id: i32) -> Result<Option<Patient>, AppError>;

    /// Flat `patient LEFT JOIN doctor` row; None when the patient does not exist.
    async fn get_with_doctor(&self, id: i32) -> Result<Option<PatientDoctorRow>, AppError>;

    async fn count(&self) -> Result<i64, AppError>;

    async fn list_window(&self, limit: i64, offset: i64) -> Result<Vec<Patient>, AppError>;

    /// Patients born in `[start, end]`.
    async fn find_by_birth_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Patient>, AppError>;

    async fn create(&self, input: &PatientInput) -> Result<i32, AppError>;

    async fn update(&self, id: i32, input: &PatientInput) -> Result<u64, AppError>;

    async fn delete(&self, id: i32) -> Result<u64, AppError>;

    async fn exists(&self, id: i32) -> Result<bool, AppError>;
}

/// Readiness probe for the backing store.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> Result<(), AppError>;
}
