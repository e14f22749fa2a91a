//! Request body validation. Limits match the column sizes of the clinic tables.

use crate::error::AppError;
use crate::model::{DoctorInput, PatientInput};
use regex::Regex;
use std::sync::OnceLock;

struct TextRule {
    max_length: usize,
    format: Option<Format>,
}

#[derive(Clone, Copy)]
enum Format {
    Email,
    Phone,
}

const NAME: TextRule = TextRule { max_length: 100, format: None };
const EMAIL: TextRule = TextRule { max_length: 150, format: Some(Format::Email) };
const PHONE: TextRule = TextRule { max_length: 20, format: Some(Format::Phone) };

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern"))
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?[0-9 ()\-]{3,20}$").expect("phone pattern"))
}

pub struct InputValidator;

impl InputValidator {
    pub fn doctor(input: &DoctorInput) -> Result<(), AppError> {
        validate_text("name", &input.name, &NAME)?;
        validate_text("surname", &input.surname, &NAME)?;
        validate_text("specialty", &input.specialty, &NAME)?;
        validate_text("email", &input.email, &EMAIL)?;
        validate_text("phone", &input.phone, &PHONE)?;
        if input.age.is_some_and(|a| a < 0) {
            return Err(AppError::Validation("El campo age no puede ser negativo".into()));
        }
        if input.salary.is_some_and(|s| !s.is_finite() || s < 0.0) {
            return Err(AppError::Validation("El campo salary debe ser un número no negativo".into()));
        }
        Ok(())
    }

    pub fn patient(input: &PatientInput) -> Result<(), AppError> {
        validate_text("name", &input.name, &NAME)?;
        validate_text("surname", &input.surname, &NAME)?;
        validate_text("email", &input.email, &EMAIL)?;
        validate_text("phone", &input.phone, &PHONE)?;
        Ok(())
    }
}

fn validate_text(field: &str, value: &str, rule: &TextRule) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("El campo {} es obligatorio", field)));
    }
    if value.chars().count() > rule.max_length {
        return Err(AppError::Validation(format!(
            "El campo {} debe tener como máximo {} caracteres",
            field, rule.max_length
        )));
    }
    match rule.format {
        Some(Format::Email) if !email_re().is_match(value) => Err(AppError::Validation(format!(
            "El campo {} debe ser un email válido",
            field
        ))),
        Some(Format::Phone) if !phone_re().is_match(value) => Err(AppError::Validation(format!(
            "El campo {} debe ser un teléfono válido",
            field
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn doctor() -> DoctorInput {
        DoctorInput {
            name: "Francisco".into(),
            surname: "Gómez".into(),
            specialty: "Cardiology".into(),
            email: "f@x.com".into(),
            phone: "600123".into(),
            age: Some(50),
            salary: Some(2500.5),
            active: Some(true),
        }
    }

    #[test]
    fn accepts_complete_doctor() {
        assert!(InputValidator::doctor(&doctor()).is_ok());
    }

    #[test]
    fn rejects_blank_required_field() {
        let mut d = doctor();
        d.surname = "   ".into();
        let err = InputValidator::doctor(&d).unwrap_err();
        assert_eq!(err.to_string(), "El campo surname es obligatorio");
    }

    #[test]
    fn rejects_bad_email_and_long_phone() {
        let mut d = doctor();
        d.email = "not-an-email".into();
        assert!(matches!(InputValidator::doctor(&d), Err(AppError::Validation(_))));
        let mut d = doctor();
        d.phone = "6".repeat(21);
        assert!(matches!(InputValidator::doctor(&d), Err(AppError::Validation(_))));
    }

    #[test]
    fn rejects_negative_age() {
        let mut d = doctor();
        d.age = Some(-1);
        assert!(InputValidator::doctor(&d).is_err());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let mut d = doctor();
        d.name = "ñ".repeat(100);
        assert!(InputValidator::doctor(&d).is_ok());
    }

    #[test]
    fn patient_requires_name() {
        let p = PatientInput {
            name: String::new(),
            surname: "Pérez".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 12).unwrap(),
            email: "juan@example.com".into(),
            phone: "600123123".into(),
            doctor_id: None,
        };
        assert!(InputValidator::patient(&p).is_err());
    }
}
