use crate::error::AppError;
use crate::model::{Patient, PatientInput, PatientWithDoctor};
use crate::service::pagination::{Page, PageRequest};
use crate::service::reconcile::{reconcile, UpdateOutcome};
use crate::service::relations::patient_with_doctor;
use crate::service::validation::InputValidator;
use crate::store::{DoctorStore, PatientStore};
use chrono::NaiveDate;
use std::sync::Arc;

fn patient_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Paciente con id {} no encontrado", id))
}

#[derive(Clone)]
pub struct PatientService {
    store: Arc<dyn PatientStore>,
    doctors: Arc<dyn DoctorStore>,
}

impl PatientService {
    pub fn new(store: Arc<dyn PatientStore>, doctors: Arc<dyn DoctorStore>) -> Self {
        PatientService { store, doctors }
    }

    pub async fn list_all(&self) -> Result<Vec<Patient>, AppError> {
        self.store.list_all().await
    }

    /// One window ordered by id plus whole-table totals. Pages past the end are empty.
    pub async fn list_page(&self, request: PageRequest) -> Result<Page<Patient>, AppError> {
        let total = self.store.count().await?;
        let items = if request.is_past_end(total) {
            Vec::new()
        } else {
            self.store.list_window(request.limit, request.offset()).await?
        };
        Ok(Page::assemble(request, total, items))
    }

    pub async fn get(&self, id: i32) -> Result<Patient, AppError> {
        self.store.get_by_id(id).await?.ok_or_else(|| patient_not_found(id))
    }

    pub async fn get_with_doctor(&self, id: i32) -> Result<PatientWithDoctor, AppError> {
        let row = self.store.get_with_doctor(id).await?.ok_or_else(|| patient_not_found(id))?;
        Ok(patient_with_doctor(row))
    }

    /// Inclusive birth-date range. An empty result is reported as not found.
    pub async fn search_by_birth_date(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Patient>, AppError> {
        if start > end {
            return Err(AppError::Validation("startDate no puede ser posterior a endDate".into()));
        }
        let patients = self.store.find_by_birth_date_range(start, end).await?;
        if patients.is_empty() {
            return Err(AppError::NotFound(format!(
                "No se encontraron pacientes nacidos entre {} y {}",
                start, end
            )));
        }
        Ok(patients)
    }

    pub async fn create(&self, input: PatientInput) -> Result<Patient, AppError> {
        self.check(&input).await?;
        let id = self.store.create(&input).await?;
        tracing::info!(patient_id = id, doctor_id = ?input.doctor_id, "patient created");
        Ok(Patient::from_input(id, input))
    }

    pub async fn update(&self, id: i32, input: PatientInput) -> Result<UpdateOutcome, AppError> {
        self.check(&input).await?;
        let affected = self.store.update(id, &input).await?;
        reconcile(affected, || self.store.exists(id), || patient_not_found(id)).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        match self.store.delete(id).await? {
            0 => Err(patient_not_found(id)),
            _ => {
                tracing::info!(patient_id = id, "patient deleted");
                Ok(())
            }
        }
    }

    /// Field rules plus the doctor reference, which must name an existing doctor.
    async fn check(&self, input: &PatientInput) -> Result<(), AppError> {
        InputValidator::patient(input)?;
        if let Some(doctor_id) = input.doctor_id {
            if !self.doctors.exists(doctor_id).await? {
                return Err(AppError::Validation(format!("Médico con id {} no existe", doctor_id)));
            }
        }
        Ok(())
    }
}
