//! HTTP handlers for doctors and patients.

pub mod doctors;
pub mod params;
pub mod patients;
