//! In-memory store for tests. Mirrors the PostgreSQL behaviour the services rely on:
//! LEFT JOIN rows, changed-rows update counts and `ON DELETE SET NULL`.

use crate::error::AppError;
use crate::model::{
    Doctor, DoctorInput, DoctorPatientCount, DoctorPatientRow, DoctorSummary, Patient, PatientDoctorRow,
    PatientInput,
};
use crate::store::{DoctorStore, PatientStore, StoreHealth};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Default)]
struct Tables {
    doctors: BTreeMap<i32, Doctor>,
    patients: BTreeMap<i32, Patient>,
    doctor_seq: i32,
    patient_seq: i32,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> R {
        let mut guard = self.tables.lock().expect("memory store poisoned");
        f(&mut guard)
    }
}

fn doctor_join_row(d: &Doctor, p: Option<&Patient>) -> DoctorPatientRow {
    DoctorPatientRow {
        d_id: d.id,
        d_name: d.name.clone(),
        d_surname: d.surname.clone(),
        d_specialty: d.specialty.clone(),
        d_email: d.email.clone(),
        d_phone: d.phone.clone(),
        d_age: d.age,
        d_salary: d.salary,
        d_active: d.active,
        p_id: p.map(|p| p.id),
        p_name: p.map(|p| p.name.clone()),
        p_surname: p.map(|p| p.surname.clone()),
        p_birth_date: p.map(|p| p.birth_date),
        p_email: p.map(|p| p.email.clone()),
        p_phone: p.map(|p| p.phone.clone()),
    }
}

#[async_trait]
impl DoctorStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Doctor>, AppError> {
        Ok(self.with(|t| t.doctors.values().cloned().collect()))
    }

    async fn list_summaries(&self) -> Result<Vec<DoctorSummary>, AppError> {
        Ok(self.with(|t| {
            t.doctors
                .values()
                .map(|d| DoctorSummary {
                    id: d.id,
                    name: d.name.clone(),
                    surname: d.surname.clone(),
                    specialty: d.specialty.clone(),
                })
                .collect()
        }))
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Doctor>, AppError> {
        Ok(self.with(|t| t.doctors.get(&id).cloned()))
    }

    async fn get_with_patients(&self, id: i32) -> Result<Vec<DoctorPatientRow>, AppError> {
        Ok(self.with(|t| {
            let Some(d) = t.doctors.get(&id) else {
                return Vec::new();
            };
            let rows: Vec<DoctorPatientRow> = t
                .patients
                .values()
                .filter(|p| p.doctor_id == Some(id))
                .map(|p| doctor_join_row(d, Some(p)))
                .collect();
            if rows.is_empty() {
                vec![doctor_join_row(d, None)]
            } else {
                rows
            }
        }))
    }

    async fn find_by_specialty(&self, specialty: &str) -> Result<Vec<Doctor>, AppError> {
        Ok(self.with(|t| t.doctors.values().filter(|d| d.specialty == specialty).cloned().collect()))
    }

    async fn find_by_age_range(&self, min_age: i32, max_age: i32) -> Result<Vec<Doctor>, AppError> {
        Ok(self.with(|t| {
            t.doctors
                .values()
                .filter(|d| d.age.is_some_and(|a| a >= min_age && a <= max_age))
                .cloned()
                .collect()
        }))
    }

    async fn patient_counts(&self) -> Result<Vec<DoctorPatientCount>, AppError> {
        Ok(self.with(|t| {
            t.doctors
                .values()
                .map(|d| DoctorPatientCount {
                    id: d.id,
                    name: d.name.clone(),
                    surname: d.surname.clone(),
                    patient_count: t.patients.values().filter(|p| p.doctor_id == Some(d.id)).count() as i64,
                })
                .collect()
        }))
    }

    async fn create(&self, input: &DoctorInput) -> Result<i32, AppError> {
        Ok(self.with(|t| {
            t.doctor_seq += 1;
            let id = t.doctor_seq;
            t.doctors.insert(id, Doctor::from_input(id, input.clone()));
            id
        }))
    }

    async fn update(&self, id: i32, input: &DoctorInput) -> Result<u64, AppError> {
        Ok(self.with(|t| match t.doctors.get_mut(&id) {
            Some(current) => {
                let next = Doctor::from_input(id, input.clone());
                if *current == next {
                    0
                } else {
                    *current = next;
                    1
                }
            }
            None => 0,
        }))
    }

    async fn delete(&self, id: i32) -> Result<u64, AppError> {
        Ok(self.with(|t| {
            if t.doctors.remove(&id).is_none() {
                return 0;
            }
            for p in t.patients.values_mut().filter(|p| p.doctor_id == Some(id)) {
                p.doctor_id = None;
            }
            1
        }))
    }

    async fn exists(&self, id: i32) -> Result<bool, AppError> {
        Ok(self.with(|t| t.doctors.contains_key(&id)))
    }
}

#[async_trait]
impl PatientStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Patient>, AppError> {
        Ok(self.with(|t| t.patients.values().cloned().collect()))
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Patient>, AppError> {
        Ok(self.with(|t| t.patients.get(&id).cloned()))
    }

    async fn get_with_doctor(&self, id: i32) -> Result<Option<PatientDoctorRow>, AppError> {
        Ok(self.with(|t| {
            let p = t.patients.get(&id)?;
            let d = p.doctor_id.and_then(|did| t.doctors.get(&did));
            Some(PatientDoctorRow {
                p_id: p.id,
                p_name: p.name.clone(),
                p_surname: p.surname.clone(),
                p_birth_date: p.birth_date,
                p_email: p.email.clone(),
                p_phone: p.phone.clone(),
                p_doctor_id: p.doctor_id,
                d_id: d.map(|d| d.id),
                d_name: d.map(|d| d.name.clone()),
                d_surname: d.map(|d| d.surname.clone()),
                d_specialty: d.map(|d| d.specialty.clone()),
                d_email: d.map(|d| d.email.clone()),
                d_phone: d.map(|d| d.phone.clone()),
                d_age: d.and_then(|d| d.age),
                d_salary: d.and_then(|d| d.salary),
                d_active: d.and_then(|d| d.active),
            })
        }))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.with(|t| t.patients.len() as i64))
    }

    async fn list_window(&self, limit: i64, offset: i64) -> Result<Vec<Patient>, AppError> {
        Ok(self.with(|t| {
            t.patients
                .values()
                .skip(offset.max(0) as usize)
                .take(limit.max(0) as usize)
                .cloned()
                .collect()
        }))
    }

    async fn find_by_birth_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Patient>, AppError> {
        Ok(self.with(|t| {
            t.patients
                .values()
                .filter(|p| p.birth_date >= start && p.birth_date <= end)
                .cloned()
                .collect()
        }))
    }

    async fn create(&self, input: &PatientInput) -> Result<i32, AppError> {
        Ok(self.with(|t| {
            t.patient_seq += 1;
            let id = t.patient_seq;
            t.patients.insert(id, Patient::from_input(id, input.clone()));
            id
        }))
    }

    async fn update(&self, id: i32, input: &PatientInput) -> Result<u64, AppError> {
        Ok(self.with(|t| match t.patients.get_mut(&id) {
            Some(current) => {
                let next = Patient::from_input(id, input.clone());
                if *current == next {
                    0
                } else {
                    *current = next;
                    1
                }
            }
            None => 0,
        }))
    }

    async fn delete(&self, id: i32) -> Result<u64, AppError> {
        Ok(self.with(|t| u64::from(t.patients.remove(&id).is_some())))
    }

    async fn exists(&self, id: i32) -> Result<bool, AppError> {
        Ok(self.with(|t| t.patients.contains_key(&id)))
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
