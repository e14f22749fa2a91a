use crate::error::AppError;
use crate::model::{Doctor, DoctorInput, DoctorSummary, DoctorWithPatients, GraphPoint};
use crate::service::reconcile::{reconcile, UpdateOutcome};
use crate::service::relations::collapse_doctor_rows;
use crate::service::validation::InputValidator;
use crate::store::DoctorStore;
use std::sync::Arc;

fn doctor_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Médico con id {} no encontrado", id))
}

#[derive(Clone)]
pub struct DoctorService {
    store: Arc<dyn DoctorStore>,
}

impl DoctorService {
    pub fn new(store: Arc<dyn DoctorStore>) -> Self {
        DoctorService { store }
    }

    pub async fn list_all(&self) -> Result<Vec<Doctor>, AppError> {
        self.store.list_all().await
    }

    pub async fn list_summaries(&self) -> Result<Vec<DoctorSummary>, AppError> {
        self.store.list_summaries().await
    }

    pub async fn get(&self, id: i32) -> Result<Doctor, AppError> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Médico no encontrado: {}", id)))
    }

    pub async fn get_with_patients(&self, id: i32) -> Result<DoctorWithPatients, AppError> {
        let rows = self.store.get_with_patients(id).await?;
        collapse_doctor_rows(rows).ok_or_else(|| AppError::NotFound(format!("Médico no encontrado: {}", id)))
    }

    /// Exact match on specialty. An empty result is reported as not found.
    pub async fn search_by_specialty(&self, specialty: &str) -> Result<Vec<Doctor>, AppError> {
        let specialty = specialty.trim();
        if specialty.is_empty() {
            return Err(AppError::Validation("El parámetro specialty es obligatorio".into()));
        }
        let doctors = self.store.find_by_specialty(specialty).await?;
        if doctors.is_empty() {
            return Err(AppError::NotFound(format!(
                "No se encontraron médicos con la especialidad {}",
                specialty
            )));
        }
        Ok(doctors)
    }

    /// Inclusive age range. An empty result is reported as not found.
    pub async fn search_by_age(&self, min_age: i32, max_age: i32) -> Result<Vec<Doctor>, AppError> {
        if min_age > max_age {
            return Err(AppError::Validation("minAge no puede ser mayor que maxAge".into()));
        }
        let doctors = self.store.find_by_age_range(min_age, max_age).await?;
        if doctors.is_empty() {
            return Err(AppError::NotFound(format!(
                "No se encontraron médicos entre {} y {} años",
                min_age, max_age
            )));
        }
        Ok(doctors)
    }

    pub async fn patient_graph(&self) -> Result<Vec<GraphPoint>, AppError> {
        let counts = self.store.patient_counts().await?;
        Ok(counts.into_iter().map(GraphPoint::from).collect())
    }

    /// Insert and return the stored record.
    pub async fn create(&self, input: DoctorInput) -> Result<Doctor, AppError> {
        InputValidator::doctor(&input)?;
        let id = self.store.create(&input).await?;
        tracing::info!(doctor_id = id, "doctor created");
        Ok(Doctor::from_input(id, input))
    }

    pub async fn update(&self, id: i32, input: DoctorInput) -> Result<UpdateOutcome, AppError> {
        InputValidator::doctor(&input)?;
        let affected = self.store.update(id, &input).await?;
        reconcile(affected, || self.store.exists(id), || doctor_not_found(id)).await
    }

    /// Patients of a deleted doctor stay, with their doctor reference cleared.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        match self.store.delete(id).await? {
            0 => Err(doctor_not_found(id)),
            _ => {
                tracing::info!(doctor_id = id, "doctor deleted");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use crate::test_utils::sample_doctor;

    fn service() -> DoctorService {
        DoctorService::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn create_then_get_round_trips_every_field() {
        let svc = service();
        let input = sample_doctor("Ana", "Cardiology", Some(45));
        let created = svc.create(input.clone()).await.unwrap();
        let fetched = svc.get(created.id).await.unwrap();
        assert_eq!(fetched, Doctor::from_input(created.id, input));
    }

    #[tokio::test]
    async fn repeated_update_is_unchanged_the_second_time() {
        let svc = service();
        let id = svc.create(sample_doctor("Ana", "Cardiology", Some(45))).await.unwrap().id;
        let next = sample_doctor("Ana", "Neurology", Some(46));
        assert_eq!(svc.update(id, next.clone()).await.unwrap(), UpdateOutcome::Changed);
        assert_eq!(svc.update(id, next).await.unwrap(), UpdateOutcome::Unchanged);
    }

    #[tokio::test]
    async fn update_of_missing_doctor_is_not_found_regardless_of_values() {
        let svc = service();
        let err = svc.update(99, sample_doctor("X", "Y", None)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(m) if m == "Médico con id 99 no encontrado"));
    }

    #[tokio::test]
    async fn doctor_without_patients_has_empty_list() {
        let svc = service();
        let id = svc.create(sample_doctor("Ana", "Cardiology", None)).await.unwrap().id;
        let out = svc.get_with_patients(id).await.unwrap();
        assert!(out.patients.is_empty());
        assert!(matches!(svc.get_with_patients(id + 1).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn age_search_is_inclusive_and_empty_is_not_found() {
        let svc = service();
        svc.create(sample_doctor("A", "Cardiology", Some(40))).await.unwrap();
        svc.create(sample_doctor("B", "Cardiology", Some(50))).await.unwrap();
        svc.create(sample_doctor("C", "Cardiology", Some(51))).await.unwrap();
        svc.create(sample_doctor("D", "Cardiology", None)).await.unwrap();
        let found = svc.search_by_age(40, 50).await.unwrap();
        let names: Vec<&str> = found.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert!(matches!(svc.search_by_age(60, 70).await, Err(AppError::NotFound(_))));
        assert!(matches!(svc.search_by_age(50, 40).await, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() {
        let svc = service();
        let id = svc.create(sample_doctor("Ana", "Cardiology", None)).await.unwrap().id;
        svc.delete(id).await.unwrap();
        assert!(matches!(svc.delete(id).await, Err(AppError::NotFound(_))));
    }
}
