//! Shared application state for all routes.

use crate::service::{DoctorService, PatientService};
use crate::store::{DoctorStore, PatientStore, StoreHealth};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub doctors: DoctorService,
    pub patients: PatientService,
    pub health: Arc<dyn StoreHealth>,
}

impl AppState {
    /// Wire both services and the readiness probe to one store.
    pub fn new<S>(store: Arc<S>) -> Self
    where
        S: DoctorStore + PatientStore + StoreHealth + 'static,
    {
        AppState {
            doctors: DoctorService::new(store.clone()),
            patients: PatientService::new(store.clone(), store.clone()),
            health: store,
        }
    }
}
