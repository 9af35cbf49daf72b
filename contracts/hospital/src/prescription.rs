use soroban_sdk::{contracttype, Env, String, Vec};

use crate::events;
use crate::identity::Identity;
use crate::policy;
use crate::storage;
use crate::validation;
use crate::HospitalError;

/// A medication order tied to exactly one appointment. The doctor and
/// patient user ids are copied from the appointment at issue time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Prescription {
    pub id: u64,
    pub appointment_id: u64,
    pub doctor_id: u64,
    pub patient_id: u64,
    pub medicine_name: String,
    pub dosage: String,
    pub instructions: String,
    pub issued_at: u64,
}

pub fn create(
    env: &Env,
    identity: &Identity,
    appointment_id: u64,
    medicine_name: String,
    dosage: String,
    instructions: String,
) -> Result<Prescription, HospitalError> {
    policy::require_doctor(identity)?;
    let appointment =
        storage::load_appointment(env, appointment_id).ok_or(HospitalError::AppointmentNotFound)?;
    if !policy::can_issue_prescription(identity, &appointment) {
        return Err(HospitalError::NotAssignedDoctor);
    }

    validation::validate_short_text(&medicine_name)?;
    validation::validate_short_text(&dosage)?;
    if instructions.is_empty() {
        return Err(HospitalError::InvalidInput);
    }
    validation::validate_long_text(&instructions)?;

    if storage::prescription_id_for_appointment(env, appointment_id).is_some() {
        return Err(HospitalError::PrescriptionExists);
    }

    let prescription = Prescription {
        id: storage::next_prescription_id(env),
        appointment_id,
        doctor_id: appointment.doctor_id,
        patient_id: appointment.patient_id,
        medicine_name,
        dosage,
        instructions,
        issued_at: env.ledger().timestamp(),
    };
    storage::insert_prescription(env, &prescription);
    events::publish_prescription_issued(env, &prescription);

    Ok(prescription)
}

/// Prescriptions the caller wrote (doctor) or received (patient), oldest first.
pub fn list(
    env: &Env,
    identity: &Identity,
    start: u32,
    limit: u32,
) -> Result<Vec<Prescription>, HospitalError> {
    validation::validate_page(limit)?;
    let index = match identity {
        Identity::Doctor { user_id, .. } => storage::Index::DoctorPrescriptions(*user_id),
        Identity::Patient { user_id, .. } => storage::Index::PatientPrescriptions(*user_id),
    };

    let mut prescriptions = Vec::new(env);
    for id in storage::page(env, index, start, limit).iter() {
        if let Some(prescription) = storage::load_prescription(env, id) {
            prescriptions.push_back(prescription);
        }
    }
    Ok(prescriptions)
}

pub fn get(
    env: &Env,
    identity: &Identity,
    prescription_id: u64,
) -> Result<Prescription, HospitalError> {
    let prescription = storage::load_prescription(env, prescription_id)
        .ok_or(HospitalError::PrescriptionNotFound)?;
    if !policy::is_prescription_visible(identity, &prescription) {
        return Err(HospitalError::NotAParticipant);
    }
    Ok(prescription)
}
