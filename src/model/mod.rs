//! Domain records, typed request bodies and flat join rows.

mod doctor;
mod joins;
mod patient;

pub use doctor::*;
pub use joins::*;
pub use patient::*;
