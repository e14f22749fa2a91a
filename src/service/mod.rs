//! Business layer: doctor and patient services plus the pieces they compose.

mod doctors;
pub mod pagination;
mod patients;
pub mod reconcile;
pub mod relations;
mod validation;

pub use doctors::DoctorService;
pub use pagination::{Page, PageRequest};
pub use patients::PatientService;
pub use reconcile::{reconcile, UpdateOutcome};
pub use validation::InputValidator;
