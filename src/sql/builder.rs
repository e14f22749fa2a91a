//! Builds parameterized SELECT, INSERT, UPDATE, DELETE and LEFT JOIN statements for the
//! clinic tables. Identifiers come from the static table definitions only; every value is a
//! `$n` parameter cast to its column type.

use crate::sql::BindValue;

pub struct Column {
    pub name: &'static str,
    pub pg_type: &'static str,
}

/// Static description of a table. `columns` lists the non-key columns in bind order.
pub struct Table {
    pub name: &'static str,
    pub pk: &'static str,
    pub pk_type: &'static str,
    pub columns: &'static [Column],
}

impl Table {
    fn column_type(&self, name: &str) -> &'static str {
        if name == self.pk {
            return self.pk_type;
        }
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.pg_type)
            .unwrap_or("text")
    }
}

pub const DOCTOR: Table = Table {
    name: "doctor",
    pk: "id",
    pk_type: "int4",
    columns: &[
        Column { name: "name", pg_type: "text" },
        Column { name: "surname", pg_type: "text" },
        Column { name: "specialty", pg_type: "text" },
        Column { name: "email", pg_type: "text" },
        Column { name: "phone", pg_type: "text" },
        Column { name: "age", pg_type: "int4" },
        Column { name: "salary", pg_type: "float8" },
        Column { name: "active", pg_type: "bool" },
    ],
};

pub const PATIENT: Table = Table {
    name: "patient",
    pk: "id",
    pk_type: "int4",
    columns: &[
        Column { name: "name", pg_type: "text" },
        Column { name: "surname", pg_type: "text" },
        Column { name: "birth_date", pg_type: "date" },
        Column { name: "email", pg_type: "text" },
        Column { name: "phone", pg_type: "text" },
        Column { name: "doctor_id", pg_type: "int4" },
    ],
};

/// Columns of the reduced doctor listing (besides the key).
pub const DOCTOR_SUMMARY_COLUMNS: &[&str] = &["name", "surname", "specialty"];

/// Quote identifier for PostgreSQL (safe: only from static definitions).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Adds a parameter and returns its placeholder, e.g. `$3::date`.
    fn push_param(&mut self, v: BindValue, pg_type: &str) -> String {
        self.params.push(v);
        format!("${}::{}", self.params.len(), pg_type)
    }
}

/// `"id", "name", ...` for the whole table.
fn select_column_list(table: &Table) -> String {
    std::iter::once(table.pk)
        .chain(table.columns.iter().map(|c| c.name))
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `d."id" AS "d_id", ...` skipping the listed columns.
fn aliased_column_list(table: &Table, alias: &str, skip: &[&str]) -> Vec<String> {
    std::iter::once(table.pk)
        .chain(table.columns.iter().map(|c| c.name))
        .filter(|name| !skip.contains(name))
        .map(|name| format!("{}.{} AS {}", alias, quoted(name), quoted(&format!("{}_{}", alias, name))))
        .collect()
}

/// SELECT every column, ordered by primary key.
pub fn select_all(table: &Table) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list(table),
        quoted(table.name),
        quoted(table.pk)
    );
    q
}

/// SELECT the key plus the given columns, ordered by primary key.
pub fn select_columns(table: &Table, columns: &[&str]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let cols: Vec<String> = std::iter::once(table.pk).chain(columns.iter().copied()).map(quoted).collect();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        cols.join(", "),
        quoted(table.name),
        quoted(table.pk)
    );
    q
}

/// SELECT by primary key.
pub fn select_by_id(table: &Table, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(BindValue::I32(id), table.pk_type);
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {}",
        select_column_list(table),
        quoted(table.name),
        quoted(table.pk),
        ph
    );
    q
}

/// SELECT rows whose column equals the value, ordered by primary key.
pub fn select_where_eq(table: &Table, column: &str, value: BindValue) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(value, table.column_type(column));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {} ORDER BY {}",
        select_column_list(table),
        quoted(table.name),
        quoted(column),
        ph,
        quoted(table.pk)
    );
    q
}

/// SELECT rows whose column lies in `[low, high]` (inclusive), ordered by primary key.
pub fn select_where_between(table: &Table, column: &str, low: BindValue, high: BindValue) -> QueryBuf {
    let mut q = QueryBuf::new();
    let pg_type = table.column_type(column);
    let low_ph = q.push_param(low, pg_type);
    let high_ph = q.push_param(high, pg_type);
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} BETWEEN {} AND {} ORDER BY {}",
        select_column_list(table),
        quoted(table.name),
        quoted(column),
        low_ph,
        high_ph,
        quoted(table.pk)
    );
    q
}

/// SELECT one page ordered by primary key.
pub fn select_window(table: &Table, limit: i64, offset: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let limit_ph = q.push_param(BindValue::I64(limit), "int8");
    let offset_ph = q.push_param(BindValue::I64(offset), "int8");
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {} LIMIT {} OFFSET {}",
        select_column_list(table),
        quoted(table.name),
        quoted(table.pk),
        limit_ph,
        offset_ph
    );
    q
}

pub fn count(table: &Table) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT COUNT(*) FROM {}", quoted(table.name));
    q
}

pub fn exists(table: &Table, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(BindValue::I32(id), table.pk_type);
    q.sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = {})",
        quoted(table.name),
        quoted(table.pk),
        ph
    );
    q
}

/// INSERT all non-key columns; the key is generated and returned.
pub fn insert(table: &Table, values: Vec<BindValue>) -> QueryBuf {
    debug_assert_eq!(values.len(), table.columns.len());
    let mut q = QueryBuf::new();
    let mut cols = Vec::with_capacity(table.columns.len());
    let mut placeholders = Vec::with_capacity(table.columns.len());
    for (c, v) in table.columns.iter().zip(values) {
        cols.push(quoted(c.name));
        placeholders.push(q.push_param(v, c.pg_type));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(table.name),
        cols.join(", "),
        placeholders.join(", "),
        quoted(table.pk)
    );
    q
}

/// UPDATE every non-key column by id. The row is only written when at least one value
/// differs from what is stored, so the affected-row count reports changed rows.
pub fn update_if_changed(table: &Table, id: i32, values: Vec<BindValue>) -> QueryBuf {
    debug_assert_eq!(values.len(), table.columns.len());
    let mut q = QueryBuf::new();
    let mut cols = Vec::with_capacity(table.columns.len());
    let mut placeholders = Vec::with_capacity(table.columns.len());
    for (c, v) in table.columns.iter().zip(values) {
        cols.push(quoted(c.name));
        placeholders.push(q.push_param(v, c.pg_type));
    }
    let id_ph = q.push_param(BindValue::I32(id), table.pk_type);
    let cols = cols.join(", ");
    let placeholders = placeholders.join(", ");
    q.sql = format!(
        "UPDATE {} SET ({}) = ({}) WHERE {} = {} AND ({}) IS DISTINCT FROM ({})",
        quoted(table.name),
        cols,
        placeholders,
        quoted(table.pk),
        id_ph,
        cols,
        placeholders
    );
    q
}

/// DELETE by id.
pub fn delete(table: &Table, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(BindValue::I32(id), table.pk_type);
    q.sql = format!("DELETE FROM {} WHERE {} = {}", quoted(table.name), quoted(table.pk), ph);
    q
}

/// Doctor LEFT JOIN patients; yields [`crate::model::DoctorPatientRow`] columns.
pub fn doctor_with_patients(id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut select_parts = aliased_column_list(&DOCTOR, "d", &[]);
    select_parts.extend(aliased_column_list(&PATIENT, "p", &["doctor_id"]));
    let ph = q.push_param(BindValue::I32(id), DOCTOR.pk_type);
    q.sql = format!(
        "SELECT {} FROM {} d LEFT JOIN {} p ON p.{} = d.{} WHERE d.{} = {} ORDER BY p.{}",
        select_parts.join(", "),
        quoted(DOCTOR.name),
        quoted(PATIENT.name),
        quoted("doctor_id"),
        quoted(DOCTOR.pk),
        quoted(DOCTOR.pk),
        ph,
        quoted(PATIENT.pk)
    );
    q
}

/// Patient LEFT JOIN doctor; yields [`crate::model::PatientDoctorRow`] columns.
pub fn patient_with_doctor(id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut select_parts = aliased_column_list(&PATIENT, "p", &[]);
    select_parts.extend(aliased_column_list(&DOCTOR, "d", &[]));
    let ph = q.push_param(BindValue::I32(id), PATIENT.pk_type);
    q.sql = format!(
        "SELECT {} FROM {} p LEFT JOIN {} d ON d.{} = p.{} WHERE p.{} = {}",
        select_parts.join(", "),
        quoted(PATIENT.name),
        quoted(DOCTOR.name),
        quoted(DOCTOR.pk),
        quoted("doctor_id"),
        quoted(PATIENT.pk),
        ph
    );
    q
}

/// Patients per doctor, including doctors with none; yields
/// [`crate::model::DoctorPatientCount`] columns.
pub fn doctor_patient_counts() -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT d.{id}, d.{name}, d.{surname}, COUNT(p.{id}) AS {count} \
         FROM {doctor} d LEFT JOIN {patient} p ON p.{fk} = d.{id} \
         GROUP BY d.{id}, d.{name}, d.{surname} ORDER BY d.{id}",
        id = quoted("id"),
        name = quoted("name"),
        surname = quoted("surname"),
        count = quoted("patient_count"),
        doctor = quoted(DOCTOR.name),
        patient = quoted(PATIENT.name),
        fk = quoted("doctor_id"),
    );
    q
}
