//! Relation resolver: collapses flat LEFT JOIN rows into nested records.

use crate::model::{Doctor, DoctorPatientRow, DoctorWithPatients, Patient, PatientDoctorRow, PatientWithDoctor};

/// Group `doctor LEFT JOIN patient` rows into one doctor with its patients.
///
/// Returns None for an empty row set (no such doctor). The all-null patient row the join
/// produces for a doctor without patients is dropped, so `patients` is empty rather than
/// holding a null record.
pub fn collapse_doctor_rows(rows: Vec<DoctorPatientRow>) -> Option<DoctorWithPatients> {
    let first = rows.first()?;
    let doctor = Doctor {
        id: first.d_id,
        name: first.d_name.clone(),
        surname: first.d_surname.clone(),
        specialty: first.d_specialty.clone(),
        email: first.d_email.clone(),
        phone: first.d_phone.clone(),
        age: first.d_age,
        salary: first.d_salary,
        active: first.d_active,
    };
    let mut patients: Vec<Patient> = rows.into_iter().filter_map(patient_from_row).collect();
    patients.sort_by_key(|p| p.id);
    patients.dedup_by_key(|p| p.id);
    Some(DoctorWithPatients { doctor, patients })
}

fn patient_from_row(row: DoctorPatientRow) -> Option<Patient> {
    Some(Patient {
        id: row.p_id?,
        name: row.p_name?,
        surname: row.p_surname?,
        birth_date: row.p_birth_date?,
        email: row.p_email?,
        phone: row.p_phone?,
        doctor_id: Some(row.d_id),
    })
}

/// Split a `patient LEFT JOIN doctor` row; `doctor` is None when unassigned.
pub fn patient_with_doctor(row: PatientDoctorRow) -> PatientWithDoctor {
    let patient = Patient {
        id: row.p_id,
        name: row.p_name,
        surname: row.p_surname,
        birth_date: row.p_birth_date,
        email: row.p_email,
        phone: row.p_phone,
        doctor_id: row.p_doctor_id,
    };
    let doctor = match (row.d_id, row.d_name, row.d_surname, row.d_specialty, row.d_email, row.d_phone) {
        (Some(id), Some(name), Some(surname), Some(specialty), Some(email), Some(phone)) => Some(Doctor {
            id,
            name,
            surname,
            specialty,
            email,
            phone,
            age: row.d_age,
            salary: row.d_salary,
            active: row.d_active,
        }),
        _ => None,
    };
    PatientWithDoctor { patient, doctor }
}
