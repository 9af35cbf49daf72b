use core::cmp::Ordering;

use soroban_sdk::{contracttype, Env, String, Vec};

use crate::calendar::{self, DateSlot, TimeSlot};
use crate::events;
use crate::identity::{Identity, Role};
use crate::policy;
use crate::storage;
use crate::validation;
use crate::HospitalError;

/// Lifecycle of an appointment.
///
/// ```text
/// pending ──► confirmed ──► completed
///    │          │  ▲
///    │          └──┘ (reschedule)
///    └──────────┴──► cancelled
/// ```
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, AppointmentStatus::Cancelled | AppointmentStatus::Completed)
    }

    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Confirmed)
                | (Confirmed, Completed)
                | (Confirmed, Cancelled)
        )
    }
}

/// Appointment attributes a caller can submit.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AppointmentField {
    Status,
    Date,
    Time,
    Notes,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Appointment {
    pub id: u64,
    /// User id of the assigned doctor.
    pub doctor_id: u64,
    /// User id of the requesting patient.
    pub patient_id: u64,
    pub date: DateSlot,
    pub time: TimeSlot,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub requested_at: u64,
    pub updated_at: u64,
}

/// A doctor's status update. `date` and `time` only take effect when the
/// appointment is being confirmed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AppointmentChanges {
    pub status: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub notes: Option<String>,
}

/// Listing order: latest date first, then latest time, with unscheduled
/// appointments after every scheduled one. Ties fall back to newest id.
pub fn schedule_order(a: &Appointment, b: &Appointment) -> Ordering {
    b.date
        .cmp(&a.date)
        .then_with(|| b.time.cmp(&a.time))
        .then_with(|| b.id.cmp(&a.id))
}

fn insert_ordered(list: &mut Vec<Appointment>, appointment: Appointment) {
    let mut index = list.len();
    for (i, existing) in list.iter().enumerate() {
        if schedule_order(&appointment, &existing) == Ordering::Less {
            index = i as u32;
            break;
        }
    }
    list.insert(index, appointment);
}

// ── Operations ─────────────────────────────────────────────────

pub fn request(
    env: &Env,
    identity: &Identity,
    doctor_profile_id: u64,
    notes: Option<String>,
) -> Result<Appointment, HospitalError> {
    let patient_id = policy::require_patient(identity)?;
    let doctor = storage::load_doctor_profile(env, doctor_profile_id)
        .ok_or(HospitalError::DoctorNotFound)?;

    let notes = match notes {
        Some(text) => {
            validation::validate_long_text(&text)?;
            if text.is_empty() {
                None
            } else {
                Some(text)
            }
        }
        None => None,
    };

    let now = env.ledger().timestamp();
    let appointment = Appointment {
        id: storage::next_appointment_id(env),
        doctor_id: doctor.user_id,
        patient_id,
        date: DateSlot::Unset,
        time: TimeSlot::Unset,
        status: AppointmentStatus::Pending,
        notes,
        requested_at: now,
        updated_at: now,
    };
    storage::insert_appointment(env, &appointment);
    events::publish_appointment_requested(env, &appointment);

    Ok(appointment)
}

/// One page of the caller's caseload. The window is counted from the most
/// recent request and the page itself comes back in schedule order.
pub fn list(
    env: &Env,
    identity: &Identity,
    start: u32,
    limit: u32,
) -> Result<Vec<Appointment>, HospitalError> {
    validation::validate_page(limit)?;
    let index = match identity {
        Identity::Doctor { user_id, .. } => storage::Index::DoctorAppointments(*user_id),
        Identity::Patient { user_id, .. } => storage::Index::PatientAppointments(*user_id),
    };
    let ids = storage::page_newest_first(env, index, start, limit);

    let mut appointments = Vec::new(env);
    for id in ids.iter() {
        if let Some(appointment) = storage::load_appointment(env, id) {
            insert_ordered(&mut appointments, appointment);
        }
    }
    Ok(appointments)
}

pub fn get(env: &Env, identity: &Identity, appointment_id: u64) -> Result<Appointment, HospitalError> {
    let appointment =
        storage::load_appointment(env, appointment_id).ok_or(HospitalError::AppointmentNotFound)?;
    if !policy::is_owner_or_assigned_doctor(identity, &appointment) {
        return Err(HospitalError::NotAParticipant);
    }
    Ok(appointment)
}

pub fn update(
    env: &Env,
    identity: &Identity,
    appointment_id: u64,
    changes: AppointmentChanges,
) -> Result<Appointment, HospitalError> {
    policy::require_doctor(identity)?;
    let mut appointment =
        storage::load_appointment(env, appointment_id).ok_or(HospitalError::AppointmentNotFound)?;
    if !policy::is_assigned_doctor(identity, &appointment) {
        return Err(HospitalError::NotAssignedDoctor);
    }

    let next = validation::parse_status_update(&changes.status)?;

    let mut submitted = [AppointmentField::Status; 4];
    let mut count = 1;
    for (present, field) in [
        (changes.date.is_some(), AppointmentField::Date),
        (changes.time.is_some(), AppointmentField::Time),
        (changes.notes.is_some(), AppointmentField::Notes),
    ] {
        if present {
            submitted[count] = field;
            count += 1;
        }
    }
    policy::ensure_writable(Role::Doctor, &submitted[..count])?;

    if next == AppointmentStatus::Confirmed {
        if let Some(date) = &changes.date {
            appointment.date =
                DateSlot::On(calendar::parse_date(date).ok_or(HospitalError::InvalidDate)?);
        }
        if let Some(time) = &changes.time {
            appointment.time =
                TimeSlot::At(calendar::parse_time(time).ok_or(HospitalError::InvalidTime)?);
        }
    }

    let previous = appointment.status;
    if !previous.can_transition_to(next) {
        return Err(HospitalError::InvalidTransition);
    }
    appointment.status = next;
    appointment.updated_at = env.ledger().timestamp();

    storage::save_appointment(env, &appointment);
    events::publish_appointment_updated(env, &appointment, previous);

    Ok(appointment)
}
