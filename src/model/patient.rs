use crate::model::Doctor;
use crate::sql::{BindValue, IntoBindRow};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Patient {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub phone: String,
    pub doctor_id: Option<i32>,
}

impl Patient {
    pub fn from_input(id: i32, input: PatientInput) -> Self {
        Patient {
            id,
            name: input.name,
            surname: input.surname,
            birth_date: input.birth_date,
            email: input.email,
            phone: input.phone,
            doctor_id: input.doctor_id,
        }
    }
}

/// Body of POST and PUT. `doctor_id` may be null to leave the patient unassigned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientInput {
    pub name: String,
    pub surname: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub doctor_id: Option<i32>,
}

impl IntoBindRow for PatientInput {
    /// Same order as the non-key columns of [`crate::sql::PATIENT`].
    fn bind_row(&self) -> Vec<BindValue> {
        vec![
            BindValue::from(self.name.as_str()),
            BindValue::from(self.surname.as_str()),
            BindValue::Date(self.birth_date),
            BindValue::from(self.email.as_str()),
            BindValue::from(self.phone.as_str()),
            BindValue::from(self.doctor_id),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PatientWithDoctor {
    #[serde(flatten)]
    pub patient: Patient,
    pub doctor: Option<Doctor>,
}

/// Paginated patient listing as sent to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PatientPage {
    pub pacientes: Vec<Patient>,
    pub total: i64,
    #[serde(rename = "totalPaginas")]
    pub total_pages: i64,
    pub pagina: i64,
    pub limite: i64,
}
