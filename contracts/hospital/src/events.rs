use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

use crate::appointment::{Appointment, AppointmentStatus};
use crate::identity::{Role, User};
use crate::prescription::Prescription;

/// Event published when a user and their role profile are created.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserRegisteredEvent {
    pub user_id: u64,
    pub account: Address,
    pub username: String,
    pub role: Role,
    pub timestamp: u64,
}

/// Event published when a profile is edited by its owner.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProfileUpdatedEvent {
    pub user_id: u64,
    pub role: Role,
    pub profile_id: u64,
    pub timestamp: u64,
}

/// Event published when a patient requests an appointment.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AppointmentRequestedEvent {
    pub appointment_id: u64,
    pub doctor_id: u64,
    pub patient_id: u64,
    pub timestamp: u64,
}

/// Event published when the assigned doctor moves an appointment.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AppointmentUpdatedEvent {
    pub appointment_id: u64,
    pub previous: AppointmentStatus,
    pub status: AppointmentStatus,
    pub timestamp: u64,
}

/// Event published when a prescription is issued.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrescriptionIssuedEvent {
    pub prescription_id: u64,
    pub appointment_id: u64,
    pub doctor_id: u64,
    pub patient_id: u64,
    pub timestamp: u64,
}

pub fn publish_user_registered(env: &Env, user: &User) {
    let topics = (symbol_short!("USR_REG"), user.account.clone());
    let data = UserRegisteredEvent {
        user_id: user.id,
        account: user.account.clone(),
        username: user.username.clone(),
        role: user.role,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_profile_updated(env: &Env, user_id: u64, role: Role, profile_id: u64) {
    let topics = (symbol_short!("PRF_UPD"), user_id);
    let data = ProfileUpdatedEvent {
        user_id,
        role,
        profile_id,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_appointment_requested(env: &Env, appointment: &Appointment) {
    let topics = (
        symbol_short!("APT_REQ"),
        appointment.patient_id,
        appointment.doctor_id,
    );
    let data = AppointmentRequestedEvent {
        appointment_id: appointment.id,
        doctor_id: appointment.doctor_id,
        patient_id: appointment.patient_id,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_appointment_updated(env: &Env, appointment: &Appointment, previous: AppointmentStatus) {
    let topics = (symbol_short!("APT_UPD"), appointment.id);
    let data = AppointmentUpdatedEvent {
        appointment_id: appointment.id,
        previous,
        status: appointment.status,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_prescription_issued(env: &Env, prescription: &Prescription) {
    let topics = (
        symbol_short!("RX_ISS"),
        prescription.patient_id,
        prescription.doctor_id,
    );
    let data = PrescriptionIssuedEvent {
        prescription_id: prescription.id,
        appointment_id: prescription.appointment_id,
        doctor_id: prescription.doctor_id,
        patient_id: prescription.patient_id,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
