use common::{extend_persistent, next_id};
use soroban_sdk::{symbol_short, Address, Env, IntoVal, String, Symbol, Val, Vec};

use crate::appointment::Appointment;
use crate::identity::User;
use crate::prescription::Prescription;
use crate::profile::{DoctorProfile, PatientProfile};

// ── Id sequences (instance storage) ────────────────────────────

const USER_CTR: Symbol = symbol_short!("USR_CTR");
const DOCTOR_CTR: Symbol = symbol_short!("DOC_CTR");
const PATIENT_CTR: Symbol = symbol_short!("PAT_CTR");
const APPOINTMENT_CTR: Symbol = symbol_short!("APT_CTR");
const PRESCRIPTION_CTR: Symbol = symbol_short!("RX_CTR");

// ── Entity and index keys (persistent storage) ─────────────────

const USER: Symbol = symbol_short!("USER");
const USER_BY_ACCOUNT: Symbol = symbol_short!("USR_ACCT");
const USER_BY_NAME: Symbol = symbol_short!("USR_NAME");

const DOCTOR: Symbol = symbol_short!("DOC_PROF");
const DOCTOR_BY_USER: Symbol = symbol_short!("DOC_USER");
const ALL_DOCTORS: Symbol = symbol_short!("DOC_ALL");

const PATIENT: Symbol = symbol_short!("PAT_PROF");
const PATIENT_BY_USER: Symbol = symbol_short!("PAT_USER");
const ALL_PATIENTS: Symbol = symbol_short!("PAT_ALL");

const APPOINTMENT: Symbol = symbol_short!("APPT");
const DOCTOR_APPOINTMENTS: Symbol = symbol_short!("DOC_APPT");
const PATIENT_APPOINTMENTS: Symbol = symbol_short!("PAT_APPT");

const PRESCRIPTION: Symbol = symbol_short!("RX");
const APPOINTMENT_PRESCRIPTION: Symbol = symbol_short!("APPT_RX");
const DOCTOR_PRESCRIPTIONS: Symbol = symbol_short!("DOC_RX");
const PATIENT_PRESCRIPTIONS: Symbol = symbol_short!("PAT_RX");

fn put<K, V>(env: &Env, key: &K, value: &V)
where
    K: IntoVal<Env, Val>,
    V: IntoVal<Env, Val>,
{
    env.storage().persistent().set(key, value);
    extend_persistent(env, key);
}

/// Append-only id lists. Every position is its own entry and the length is
/// kept under `(name, owner)`, so appending or reading a page touches a fixed
/// number of entries however long the list grows.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Index {
    Doctors,
    Patients,
    DoctorAppointments(u64),
    PatientAppointments(u64),
    DoctorPrescriptions(u64),
    PatientPrescriptions(u64),
}

impl Index {
    /// Global lists have no owner and use 0, which is never a user id.
    fn key(self) -> (Symbol, u64) {
        match self {
            Index::Doctors => (ALL_DOCTORS, 0),
            Index::Patients => (ALL_PATIENTS, 0),
            Index::DoctorAppointments(user_id) => (DOCTOR_APPOINTMENTS, user_id),
            Index::PatientAppointments(user_id) => (PATIENT_APPOINTMENTS, user_id),
            Index::DoctorPrescriptions(user_id) => (DOCTOR_PRESCRIPTIONS, user_id),
            Index::PatientPrescriptions(user_id) => (PATIENT_PRESCRIPTIONS, user_id),
        }
    }
}

fn index_len(env: &Env, index: Index) -> u32 {
    env.storage().persistent().get(&index.key()).unwrap_or(0)
}

fn append(env: &Env, index: Index, id: u64) {
    let len = index_len(env, index);
    let (name, owner) = index.key();
    put(env, &(name.clone(), owner, len), &id);
    put(env, &(name, owner), &(len + 1));
}

fn id_at(env: &Env, index: Index, position: u32) -> Option<u64> {
    let (name, owner) = index.key();
    env.storage().persistent().get(&(name, owner, position))
}

/// Ids at positions `start..start + limit`, oldest first.
pub fn page(env: &Env, index: Index, start: u32, limit: u32) -> Vec<u64> {
    let end = start.saturating_add(limit).min(index_len(env, index));
    let mut ids = Vec::new(env);
    for position in start..end {
        if let Some(id) = id_at(env, index, position) {
            ids.push_back(id);
        }
    }
    ids
}

/// The same window counted back from the most recent entry.
pub fn page_newest_first(env: &Env, index: Index, start: u32, limit: u32) -> Vec<u64> {
    let len = index_len(env, index);
    let end = start.saturating_add(limit).min(len);
    let mut ids = Vec::new(env);
    for offset in start..end {
        if let Some(id) = id_at(env, index, len - 1 - offset) {
            ids.push_back(id);
        }
    }
    ids
}

// ── Users ──────────────────────────────────────────────────────

pub fn next_user_id(env: &Env) -> u64 {
    next_id(env, &USER_CTR)
}

/// Stores a new user together with its account and username lookups.
pub fn insert_user(env: &Env, user: &User) {
    put(env, &(USER, user.id), user);
    put(env, &(USER_BY_ACCOUNT, user.account.clone()), &user.id);
    put(env, &(USER_BY_NAME, user.username.clone()), &user.id);
}

pub fn load_user(env: &Env, user_id: u64) -> Option<User> {
    env.storage().persistent().get(&(USER, user_id))
}

pub fn user_id_for_account(env: &Env, account: &Address) -> Option<u64> {
    env.storage()
        .persistent()
        .get(&(USER_BY_ACCOUNT, account.clone()))
}

pub fn user_id_for_username(env: &Env, username: &String) -> Option<u64> {
    env.storage()
        .persistent()
        .get(&(USER_BY_NAME, username.clone()))
}

// ── Profiles ───────────────────────────────────────────────────

pub fn next_doctor_profile_id(env: &Env) -> u64 {
    next_id(env, &DOCTOR_CTR)
}

pub fn next_patient_profile_id(env: &Env) -> u64 {
    next_id(env, &PATIENT_CTR)
}

/// Stores a freshly provisioned doctor profile and links it to its user.
pub fn insert_doctor_profile(env: &Env, profile: &DoctorProfile) {
    save_doctor_profile(env, profile);
    put(env, &(DOCTOR_BY_USER, profile.user_id), &profile.id);
    append(env, Index::Doctors, profile.id);
}

pub fn save_doctor_profile(env: &Env, profile: &DoctorProfile) {
    put(env, &(DOCTOR, profile.id), profile);
}

pub fn load_doctor_profile(env: &Env, profile_id: u64) -> Option<DoctorProfile> {
    env.storage().persistent().get(&(DOCTOR, profile_id))
}

pub fn doctor_profile_id_for_user(env: &Env, user_id: u64) -> Option<u64> {
    env.storage().persistent().get(&(DOCTOR_BY_USER, user_id))
}

/// Stores a freshly provisioned patient profile and links it to its user.
pub fn insert_patient_profile(env: &Env, profile: &PatientProfile) {
    save_patient_profile(env, profile);
    put(env, &(PATIENT_BY_USER, profile.user_id), &profile.id);
    append(env, Index::Patients, profile.id);
}

pub fn save_patient_profile(env: &Env, profile: &PatientProfile) {
    put(env, &(PATIENT, profile.id), profile);
}

pub fn load_patient_profile(env: &Env, profile_id: u64) -> Option<PatientProfile> {
    env.storage().persistent().get(&(PATIENT, profile_id))
}

pub fn patient_profile_id_for_user(env: &Env, user_id: u64) -> Option<u64> {
    env.storage().persistent().get(&(PATIENT_BY_USER, user_id))
}

// ── Appointments ───────────────────────────────────────────────

pub fn next_appointment_id(env: &Env) -> u64 {
    next_id(env, &APPOINTMENT_CTR)
}

/// Stores a new appointment and adds it to both parties' caseloads.
pub fn insert_appointment(env: &Env, appointment: &Appointment) {
    save_appointment(env, appointment);
    append(env, Index::DoctorAppointments(appointment.doctor_id), appointment.id);
    append(env, Index::PatientAppointments(appointment.patient_id), appointment.id);
}

pub fn save_appointment(env: &Env, appointment: &Appointment) {
    put(env, &(APPOINTMENT, appointment.id), appointment);
}

pub fn load_appointment(env: &Env, appointment_id: u64) -> Option<Appointment> {
    env.storage().persistent().get(&(APPOINTMENT, appointment_id))
}

// ── Prescriptions ──────────────────────────────────────────────

pub fn next_prescription_id(env: &Env) -> u64 {
    next_id(env, &PRESCRIPTION_CTR)
}

/// Stores a new prescription, claims its appointment and indexes it for
/// both the issuing doctor and the covered patient.
pub fn insert_prescription(env: &Env, prescription: &Prescription) {
    put(env, &(PRESCRIPTION, prescription.id), prescription);
    put(
        env,
        &(APPOINTMENT_PRESCRIPTION, prescription.appointment_id),
        &prescription.id,
    );
    append(env, Index::DoctorPrescriptions(prescription.doctor_id), prescription.id);
    append(env, Index::PatientPrescriptions(prescription.patient_id), prescription.id);
}

pub fn load_prescription(env: &Env, prescription_id: u64) -> Option<Prescription> {
    env.storage().persistent().get(&(PRESCRIPTION, prescription_id))
}

pub fn prescription_id_for_appointment(env: &Env, appointment_id: u64) -> Option<u64> {
    env.storage()
        .persistent()
        .get(&(APPOINTMENT_PRESCRIPTION, appointment_id))
}
