//! Startup bootstrap: create the database and the clinic tables when missing.
//! Idempotent DDL only; there is no migration history.

use crate::error::{AppError, ConfigError};
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

const DOCTOR_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS "doctor" (
    "id" SERIAL PRIMARY KEY,
    "name" VARCHAR(100) NOT NULL,
    "surname" VARCHAR(100) NOT NULL,
    "specialty" VARCHAR(100) NOT NULL,
    "email" VARCHAR(150) NOT NULL,
    "phone" VARCHAR(20) NOT NULL,
    "age" INTEGER,
    "salary" DOUBLE PRECISION,
    "active" BOOLEAN
)
"#;

/// Deleting a doctor leaves its patients unassigned (`ON DELETE SET NULL`).
const PATIENT_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS "patient" (
    "id" SERIAL PRIMARY KEY,
    "name" VARCHAR(100) NOT NULL,
    "surname" VARCHAR(100) NOT NULL,
    "birth_date" DATE NOT NULL,
    "email" VARCHAR(150) NOT NULL,
    "phone" VARCHAR(20) NOT NULL,
    "doctor_id" INTEGER REFERENCES "doctor" ("id") ON DELETE SET NULL
)
"#;

const PATIENT_DOCTOR_INDEX: &str =
    r#"CREATE INDEX IF NOT EXISTS "patient_doctor_id_idx" ON "patient" ("doctor_id")"#;

/// Create `doctor` and `patient` if they do not exist.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for ddl in [DOCTOR_DDL, PATIENT_DDL, PATIENT_DOCTOR_INDEX] {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::debug!("clinic tables ready");
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// maintenance `postgres` database to run CREATE DATABASE. Call before creating the main pool.
/// A URL without a database name is left to the server defaults.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin, db_name) = admin_target(database_url)?;
    let Some(db_name) = db_name.filter(|n| n != "postgres") else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Connect options for the maintenance database, plus the database named in the URL.
fn admin_target(database_url: &str) -> Result<(PgConnectOptions, Option<String>), ConfigError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(|_| ConfigError::InvalidVar {
        var: "DATABASE_URL",
        value: database_url.to_string(),
    })?;
    let db_name = opts.get_database().map(str::trim).filter(|n| !n.is_empty()).map(str::to_string);
    Ok((opts.database("postgres"), db_name))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
