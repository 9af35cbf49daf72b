#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod appointment;
pub mod calendar;
pub mod errors;
pub mod events;
pub mod identity;
pub mod policy;
pub mod prescription;
pub mod profile;
mod storage;
pub mod validation;

#[cfg(test)]
mod test_appointments;
#[cfg(test)]
mod test_prescriptions;

use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, String, Vec};

pub use appointment::{Appointment, AppointmentChanges, AppointmentField, AppointmentStatus};
pub use calendar::{Date, DateSlot, TimeOfDay, TimeSlot};
pub use errors::{ErrorKind, HospitalError};
pub use identity::{Identity, Registration, Role, UserView};
pub use prescription::Prescription;
pub use profile::{
    DoctorDetails, DoctorProfileUpdate, DoctorProfileView, PatientDetails, PatientProfileUpdate,
    PatientProfileView, Profile, ProfileDetails, ProfileUpdate,
};

use errors::log_error;

/// Authenticates `caller`, runs `action` as that identity and logs any
/// rejection under `operation`.
fn as_caller<T>(
    env: &Env,
    caller: &Address,
    operation: &str,
    action: impl FnOnce(&Identity) -> Result<T, HospitalError>,
) -> Result<T, HospitalError> {
    identity::authenticate(env, caller)
        .and_then(|identity| action(&identity))
        .map_err(|error| log_error(env, caller, operation, error))
}

#[contract]
pub struct HospitalContract;

#[contractimpl]
impl HospitalContract {
    // ── Accounts ───────────────────────────────────────────────

    /// Register `account` as a doctor or patient, creating the matching
    /// profile in the same call.
    pub fn register(
        env: Env,
        account: Address,
        registration: Registration,
    ) -> Result<UserView, HospitalError> {
        identity::register(&env, &account, registration)
            .map_err(|error| log_error(&env, &account, "register", error))
    }

    pub fn current_user(env: Env, caller: Address) -> Result<UserView, HospitalError> {
        as_caller(&env, &caller, "current_user", |identity| {
            identity::current_user(&env, identity)
        })
    }

    /// Check a username and the client-derived password verifier and return
    /// the matching user.
    pub fn verify_credentials(
        env: Env,
        username: String,
        verifier: BytesN<32>,
    ) -> Result<UserView, HospitalError> {
        identity::verify_credentials(&env, &username, &verifier).map_err(|error| {
            log_error(
                &env,
                &env.current_contract_address(),
                "verify_credentials",
                error,
            )
        })
    }

    // ── Profiles ───────────────────────────────────────────────

    /// Listings return at most `limit` entries starting at position `start`.
    pub fn list_doctors(
        env: Env,
        caller: Address,
        start: u32,
        limit: u32,
    ) -> Result<Vec<DoctorProfileView>, HospitalError> {
        as_caller(&env, &caller, "list_doctors", |_| {
            profile::list_doctors(&env, start, limit)
        })
    }

    /// Doctors a patient can request an appointment with.
    pub fn list_available_doctors(
        env: Env,
        caller: Address,
        start: u32,
        limit: u32,
    ) -> Result<Vec<DoctorProfileView>, HospitalError> {
        as_caller(&env, &caller, "list_available_doctors", |identity| {
            profile::list_available_doctors(&env, identity, start, limit)
        })
    }

    pub fn list_patients(
        env: Env,
        caller: Address,
        start: u32,
        limit: u32,
    ) -> Result<Vec<PatientProfileView>, HospitalError> {
        as_caller(&env, &caller, "list_patients", |identity| {
            profile::list_patients(&env, identity, start, limit)
        })
    }

    pub fn get_own_profile(env: Env, caller: Address) -> Result<Profile, HospitalError> {
        as_caller(&env, &caller, "get_own_profile", |identity| {
            profile::get_own(&env, identity)
        })
    }

    pub fn update_own_profile(
        env: Env,
        caller: Address,
        update: ProfileUpdate,
    ) -> Result<Profile, HospitalError> {
        as_caller(&env, &caller, "update_own_profile", |identity| {
            profile::update_own(&env, identity, update)
        })
    }

    pub fn get_doctor_profile(
        env: Env,
        caller: Address,
        profile_id: u64,
    ) -> Result<DoctorProfileView, HospitalError> {
        as_caller(&env, &caller, "get_doctor_profile", |identity| {
            profile::get_doctor(&env, identity, profile_id)
        })
    }

    pub fn update_doctor_profile(
        env: Env,
        caller: Address,
        profile_id: u64,
        update: DoctorProfileUpdate,
    ) -> Result<DoctorProfileView, HospitalError> {
        as_caller(&env, &caller, "update_doctor_profile", |identity| {
            profile::update_doctor(&env, identity, profile_id, update)
        })
    }

    pub fn get_patient_profile(
        env: Env,
        caller: Address,
        profile_id: u64,
    ) -> Result<PatientProfileView, HospitalError> {
        as_caller(&env, &caller, "get_patient_profile", |identity| {
            profile::get_patient(&env, identity, profile_id)
        })
    }

    pub fn update_patient_profile(
        env: Env,
        caller: Address,
        profile_id: u64,
        update: PatientProfileUpdate,
    ) -> Result<PatientProfileView, HospitalError> {
        as_caller(&env, &caller, "update_patient_profile", |identity| {
            profile::update_patient(&env, identity, profile_id, update)
        })
    }

    // ── Appointments ───────────────────────────────────────────

    /// Ask the doctor behind `doctor_profile_id` for an appointment. The
    /// doctor fixes the date and time when confirming.
    pub fn request_appointment(
        env: Env,
        caller: Address,
        doctor_profile_id: u64,
        notes: Option<String>,
    ) -> Result<Appointment, HospitalError> {
        as_caller(&env, &caller, "request_appointment", |identity| {
            appointment::request(&env, identity, doctor_profile_id, notes)
        })
    }

    /// A page of the caller's caseload, counted from the latest request and
    /// returned in schedule order.
    pub fn list_appointments(
        env: Env,
        caller: Address,
        start: u32,
        limit: u32,
    ) -> Result<Vec<Appointment>, HospitalError> {
        as_caller(&env, &caller, "list_appointments", |identity| {
            appointment::list(&env, identity, start, limit)
        })
    }

    pub fn get_appointment(
        env: Env,
        caller: Address,
        appointment_id: u64,
    ) -> Result<Appointment, HospitalError> {
        as_caller(&env, &caller, "get_appointment", |identity| {
            appointment::get(&env, identity, appointment_id)
        })
    }

    /// Confirm, cancel or complete an appointment as its assigned doctor.
    pub fn update_appointment(
        env: Env,
        caller: Address,
        appointment_id: u64,
        changes: AppointmentChanges,
    ) -> Result<Appointment, HospitalError> {
        as_caller(&env, &caller, "update_appointment", |identity| {
            appointment::update(&env, identity, appointment_id, changes)
        })
    }

    /// Appointment fields `role` is allowed to submit.
    pub fn writable_fields(env: Env, role: Role) -> Vec<AppointmentField> {
        Vec::from_slice(&env, policy::writable_fields(role))
    }

    // ── Prescriptions ──────────────────────────────────────────

    pub fn create_prescription(
        env: Env,
        caller: Address,
        appointment_id: u64,
        medicine_name: String,
        dosage: String,
        instructions: String,
    ) -> Result<Prescription, HospitalError> {
        as_caller(&env, &caller, "create_prescription", |identity| {
            prescription::create(
                &env,
                identity,
                appointment_id,
                medicine_name,
                dosage,
                instructions,
            )
        })
    }

    pub fn list_prescriptions(
        env: Env,
        caller: Address,
        start: u32,
        limit: u32,
    ) -> Result<Vec<Prescription>, HospitalError> {
        as_caller(&env, &caller, "list_prescriptions", |identity| {
            prescription::list(&env, identity, start, limit)
        })
    }

    pub fn get_prescription(
        env: Env,
        caller: Address,
        prescription_id: u64,
    ) -> Result<Prescription, HospitalError> {
        as_caller(&env, &caller, "get_prescription", |identity| {
            prescription::get(&env, identity, prescription_id)
        })
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }
}
