//! Access rules. Everything here is a pure function of the authenticated
//! identity and the record being touched; callers turn a `false` into the
//! matching error.

use crate::appointment::{Appointment, AppointmentField};
use crate::identity::{Identity, Role};
use crate::prescription::Prescription;
use crate::HospitalError;

const PATIENT_WRITABLE: &[AppointmentField] = &[
    AppointmentField::Date,
    AppointmentField::Time,
    AppointmentField::Notes,
];

const DOCTOR_WRITABLE: &[AppointmentField] = &[
    AppointmentField::Status,
    AppointmentField::Date,
    AppointmentField::Time,
];

pub fn is_doctor(identity: &Identity) -> bool {
    matches!(identity, Identity::Doctor { .. })
}

pub fn is_patient(identity: &Identity) -> bool {
    matches!(identity, Identity::Patient { .. })
}

/// Returns the caller's user id when they hold a doctor profile.
pub fn require_doctor(identity: &Identity) -> Result<u64, HospitalError> {
    match identity {
        Identity::Doctor { user_id, .. } => Ok(*user_id),
        Identity::Patient { .. } => Err(HospitalError::NotADoctor),
    }
}

/// Returns the caller's user id when they hold a patient profile.
pub fn require_patient(identity: &Identity) -> Result<u64, HospitalError> {
    match identity {
        Identity::Patient { user_id, .. } => Ok(*user_id),
        Identity::Doctor { .. } => Err(HospitalError::NotAPatient),
    }
}

pub fn is_profile_owner(identity: &Identity, owner_user_id: u64) -> bool {
    identity.user_id() == owner_user_id
}

pub fn is_owner_or_assigned_doctor(identity: &Identity, appointment: &Appointment) -> bool {
    let user_id = identity.user_id();
    user_id == appointment.patient_id || user_id == appointment.doctor_id
}

pub fn is_assigned_doctor(identity: &Identity, appointment: &Appointment) -> bool {
    is_doctor(identity) && identity.user_id() == appointment.doctor_id
}

pub fn can_issue_prescription(identity: &Identity, appointment: &Appointment) -> bool {
    is_assigned_doctor(identity, appointment)
}

pub fn is_prescription_visible(identity: &Identity, prescription: &Prescription) -> bool {
    let user_id = identity.user_id();
    user_id == prescription.doctor_id || user_id == prescription.patient_id
}

/// Appointment fields each role may submit.
pub fn writable_fields(role: Role) -> &'static [AppointmentField] {
    match role {
        Role::Patient => PATIENT_WRITABLE,
        Role::Doctor => DOCTOR_WRITABLE,
    }
}

pub fn ensure_writable(role: Role, submitted: &[AppointmentField]) -> Result<(), HospitalError> {
    let allowed = writable_fields(role);
    if submitted.iter().all(|field| allowed.contains(field)) {
        Ok(())
    } else {
        Err(HospitalError::ReadOnlyField)
    }
}
