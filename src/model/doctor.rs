use crate::model::Patient;
use crate::sql::{BindValue, IntoBindRow};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Doctor {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub specialty: String,
    pub email: String,
    pub phone: String,
    pub age: Option<i32>,
    pub salary: Option<f64>,
    pub active: Option<bool>,
}

impl Doctor {
    pub fn from_input(id: i32, input: DoctorInput) -> Self {
        Doctor {
            id,
            name: input.name,
            surname: input.surname,
            specialty: input.specialty,
            email: input.email,
            phone: input.phone,
            age: input.age,
            salary: input.salary,
            active: input.active,
        }
    }
}

/// Reduced projection used to populate selection lists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DoctorSummary {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub specialty: String,
}

/// Body of POST and PUT. Every updatable column is listed; there is no partial update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DoctorInput {
    pub name: String,
    pub surname: String,
    pub specialty: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl IntoBindRow for DoctorInput {
    /// Same order as the non-key columns of [`crate::sql::DOCTOR`].
    fn bind_row(&self) -> Vec<BindValue> {
        vec![
            BindValue::from(self.name.as_str()),
            BindValue::from(self.surname.as_str()),
            BindValue::from(self.specialty.as_str()),
            BindValue::from(self.email.as_str()),
            BindValue::from(self.phone.as_str()),
            BindValue::from(self.age),
            BindValue::from(self.salary),
            BindValue::from(self.active),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DoctorWithPatients {
    #[serde(flatten)]
    pub doctor: Doctor,
    pub patients: Vec<Patient>,
}

#[derive(Clone, Debug, PartialEq, Eq, FromRow)]
pub struct DoctorPatientCount {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub patient_count: i64,
}

/// One bar of the patients-per-doctor chart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphPoint {
    pub name: String,
    pub value: i64,
}

impl From<DoctorPatientCount> for GraphPoint {
    fn from(c: DoctorPatientCount) -> Self {
        GraphPoint {
            name: format!("{} {}", c.name, c.surname),
            value: c.patient_count,
        }
    }
}
