//! PostgreSQL store: executes builder queries against the pool and decodes typed rows.

use crate::error::AppError;
use crate::model::{
    Doctor, DoctorInput, DoctorPatientCount, DoctorPatientRow, DoctorSummary, Patient, PatientDoctorRow,
    PatientInput,
};
use crate::sql::{self, BindValue, IntoBindRow, QueryBuf, DOCTOR, DOCTOR_SUMMARY_COLUMNS, PATIENT};
use crate::store::{DoctorStore, PatientStore, StoreHealth};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    async fn fetch_all<T>(&self, q: QueryBuf) -> Result<Vec<T>, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let QueryBuf { sql, params } = q;
        let mut query = sqlx::query_as::<_, T>(&sql);
        for p in params {
            query = query.bind(p);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn fetch_optional<T>(&self, q: QueryBuf) -> Result<Option<T>, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let QueryBuf { sql, params } = q;
        let mut query = sqlx::query_as::<_, T>(&sql);
        for p in params {
            query = query.bind(p);
        }
        Ok(query.fetch_optional(&self.pool).await?)
    }

    async fn fetch_scalar<T>(&self, q: QueryBuf) -> Result<T, AppError>
    where
        T: Send + Unpin,
        (T,): for<'r> FromRow<'r, PgRow>,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let QueryBuf { sql, params } = q;
        let mut query = sqlx::query_scalar::<_, T>(&sql);
        for p in params {
            query = query.bind(p);
        }
        Ok(query.fetch_one(&self.pool).await?)
    }

    async fn execute(&self, q: QueryBuf) -> Result<u64, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let QueryBuf { sql, params } = q;
        let mut query = sqlx::query(&sql);
        for p in params {
            query = query.bind(p);
        }
        Ok(query.execute(&self.pool).await?.rows_affected())
    }
}

#[async_trait]
impl DoctorStore for PgStore {
    async fn list_all(&self) -> Result<Vec<Doctor>, AppError> {
        self.fetch_all(sql::select_all(&DOCTOR)).await
    }

    async fn list_summaries(&self) -> Result<Vec<DoctorSummary>, AppError> {
        self.fetch_all(sql::select_columns(&DOCTOR, DOCTOR_SUMMARY_COLUMNS)).await
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Doctor>, AppError> {
        self.fetch_optional(sql::select_by_id(&DOCTOR, id)).await
    }

    async fn get_with_patients(&self, id: i32) -> Result<Vec<DoctorPatientRow>, AppError> {
        self.fetch_all(sql::doctor_with_patients(id)).await
    }

    async fn find_by_specialty(&self, specialty: &str) -> Result<Vec<Doctor>, AppError> {
        self.fetch_all(sql::select_where_eq(&DOCTOR, "specialty", BindValue::from(specialty)))
            .await
    }

    async fn find_by_age_range(&self, min_age: i32, max_age: i32) -> Result<Vec<Doctor>, AppError> {
        self.fetch_all(sql::select_where_between(
            &DOCTOR,
            "age",
            BindValue::I32(min_age),
            BindValue::I32(max_age),
        ))
        .await
    }

    async fn patient_counts(&self) -> Result<Vec<DoctorPatientCount>, AppError> {
        self.fetch_all(sql::doctor_patient_counts()).await
    }

    async fn create(&self, input: &DoctorInput) -> Result<i32, AppError> {
        self.fetch_scalar(sql::insert(&DOCTOR, input.bind_row())).await
    }

    async fn update(&self, id: i32, input: &DoctorInput) -> Result<u64, AppError> {
        self.execute(sql::update_if_changed(&DOCTOR, id, input.bind_row())).await
    }

    async fn delete(&self, id: i32) -> Result<u64, AppError> {
        self.execute(sql::delete(&DOCTOR, id)).await
    }

    async fn exists(&self, id: i32) -> Result<bool, AppError> {
        self.fetch_scalar(sql::exists(&DOCTOR, id)).await
    }
}

#[async_trait]
impl PatientStore for PgStore {
    async fn list_all(&self) -> Result<Vec<Patient>, AppError> {
        self.fetch_all(sql::select_all(&PATIENT)).await
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Patient>, AppError> {
        self.fetch_optional(sql::select_by_id(&PATIENT, id)).await
    }

    async fn get_with_doctor(&self, id: i32) -> Result<Option<PatientDoctorRow>, AppError> {
        self.fetch_optional(sql::patient_with_doctor(id)).await
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.fetch_scalar(sql::count(&PATIENT)).await
    }

    async fn list_window(&self, limit: i64, offset: i64) -> Result<Vec<Patient>, AppError> {
        self.fetch_all(sql::select_window(&PATIENT, limit, offset)).await
    }

    async fn find_by_birth_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Patient>, AppError> {
        self.fetch_all(sql::select_where_between(
            &PATIENT,
            "birth_date",
            BindValue::Date(start),
            BindValue::Date(end),
        ))
        .await
    }

    async fn create(&self, input: &PatientInput) -> Result<i32, AppError> {
        self.fetch_scalar(sql::insert(&PATIENT, input.bind_row())).await
    }

    async fn update(&self, id: i32, input: &PatientInput) -> Result<u64, AppError> {
        self.execute(sql::update_if_changed(&PATIENT, id, input.bind_row())).await
    }

    async fn delete(&self, id: i32) -> Result<u64, AppError> {
        self.execute(sql::delete(&PATIENT, id)).await
    }

    async fn exists(&self, id: i32) -> Result<bool, AppError> {
        self.fetch_scalar(sql::exists(&PATIENT, id)).await
    }
}

#[async_trait]
impl StoreHealth for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
