use soroban_sdk::{contracttype, Env, String, Vec};

use crate::calendar::{self, DateSlot};
use crate::events;
use crate::identity::{Identity, Role, UserView};
use crate::policy;
use crate::storage;
use crate::validation;
use crate::HospitalError;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DoctorProfile {
    pub id: u64,
    pub user_id: u64,
    pub specialty: String,
    pub bio: Option<String>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientProfile {
    pub id: u64,
    pub user_id: u64,
    pub date_of_birth: DateSlot,
    pub medical_history: Option<String>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DoctorProfileView {
    pub id: u64,
    pub user: UserView,
    pub specialty: String,
    pub bio: Option<String>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientProfileView {
    pub id: u64,
    pub user: UserView,
    pub date_of_birth: DateSlot,
    pub medical_history: Option<String>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Profile {
    Doctor(DoctorProfileView),
    Patient(PatientProfileView),
}

/// Profile attributes supplied at registration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DoctorDetails {
    pub specialty: String,
    pub bio: Option<String>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientDetails {
    /// `YYYY-MM-DD`.
    pub date_of_birth: Option<String>,
    pub medical_history: Option<String>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProfileDetails {
    /// Register with an empty profile of the chosen role.
    Empty,
    Doctor(DoctorDetails),
    Patient(PatientDetails),
}

/// Partial update. `None` keeps a field; an empty string clears an optional one.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DoctorProfileUpdate {
    pub specialty: Option<String>,
    pub bio: Option<String>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientProfileUpdate {
    pub date_of_birth: Option<String>,
    pub medical_history: Option<String>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProfileUpdate {
    Doctor(DoctorProfileUpdate),
    Patient(PatientProfileUpdate),
}

/// A validated profile waiting for its owner's user id.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NewProfile {
    Doctor {
        specialty: String,
        bio: Option<String>,
    },
    Patient {
        date_of_birth: DateSlot,
        medical_history: Option<String>,
    },
}

/// Validates registration-time profile details against the chosen role.
pub fn prepare(
    env: &Env,
    role: Role,
    details: ProfileDetails,
) -> Result<NewProfile, HospitalError> {
    match (role, details) {
        (Role::Doctor, ProfileDetails::Empty) => Ok(NewProfile::Doctor {
            specialty: String::from_str(env, ""),
            bio: None,
        }),
        (Role::Patient, ProfileDetails::Empty) => Ok(NewProfile::Patient {
            date_of_birth: DateSlot::Unset,
            medical_history: None,
        }),
        (Role::Doctor, ProfileDetails::Doctor(details)) => {
            validation::validate_short_text(&details.specialty)?;
            Ok(NewProfile::Doctor {
                specialty: details.specialty,
                bio: optional_text(details.bio)?,
            })
        }
        (Role::Patient, ProfileDetails::Patient(details)) => Ok(NewProfile::Patient {
            date_of_birth: optional_birth_date(details.date_of_birth)?,
            medical_history: optional_text(details.medical_history)?,
        }),
        _ => Err(HospitalError::RoleMismatch),
    }
}

/// Stores a prepared profile for `user_id` and returns its id.
pub fn provision(env: &Env, user_id: u64, profile: NewProfile) -> u64 {
    match profile {
        NewProfile::Doctor { specialty, bio } => {
            let profile = DoctorProfile {
                id: storage::next_doctor_profile_id(env),
                user_id,
                specialty,
                bio,
            };
            storage::insert_doctor_profile(env, &profile);
            profile.id
        }
        NewProfile::Patient {
            date_of_birth,
            medical_history,
        } => {
            let profile = PatientProfile {
                id: storage::next_patient_profile_id(env),
                user_id,
                date_of_birth,
                medical_history,
            };
            storage::insert_patient_profile(env, &profile);
            profile.id
        }
    }
}

fn optional_text(text: Option<String>) -> Result<Option<String>, HospitalError> {
    match text {
        Some(text) if text.is_empty() => Ok(None),
        Some(text) => {
            validation::validate_long_text(&text)?;
            Ok(Some(text))
        }
        None => Ok(None),
    }
}

fn optional_birth_date(text: Option<String>) -> Result<DateSlot, HospitalError> {
    match text {
        Some(text) if text.is_empty() => Ok(DateSlot::Unset),
        Some(text) => calendar::parse_iso_date(&text)
            .map(DateSlot::On)
            .ok_or(HospitalError::InvalidDate),
        None => Ok(DateSlot::Unset),
    }
}

fn apply_doctor_update(
    profile: &mut DoctorProfile,
    update: DoctorProfileUpdate,
) -> Result<(), HospitalError> {
    if let Some(specialty) = update.specialty {
        validation::validate_short_text(&specialty)?;
        profile.specialty = specialty;
    }
    if let Some(bio) = update.bio {
        profile.bio = optional_text(Some(bio))?;
    }
    Ok(())
}

fn apply_patient_update(
    profile: &mut PatientProfile,
    update: PatientProfileUpdate,
) -> Result<(), HospitalError> {
    if let Some(date_of_birth) = update.date_of_birth {
        profile.date_of_birth = optional_birth_date(Some(date_of_birth))?;
    }
    if let Some(history) = update.medical_history {
        profile.medical_history = optional_text(Some(history))?;
    }
    Ok(())
}

fn doctor_view(env: &Env, profile: DoctorProfile) -> Result<DoctorProfileView, HospitalError> {
    let user = storage::load_user(env, profile.user_id).ok_or(HospitalError::UserNotFound)?;
    Ok(DoctorProfileView {
        id: profile.id,
        user: user.view(),
        specialty: profile.specialty,
        bio: profile.bio,
    })
}

fn patient_view(env: &Env, profile: PatientProfile) -> Result<PatientProfileView, HospitalError> {
    let user = storage::load_user(env, profile.user_id).ok_or(HospitalError::UserNotFound)?;
    Ok(PatientProfileView {
        id: profile.id,
        user: user.view(),
        date_of_birth: profile.date_of_birth,
        medical_history: profile.medical_history,
    })
}

// ── Directory ──────────────────────────────────────────────────

/// Doctors at directory positions `start..start + limit`, in registration order.
pub fn list_doctors(
    env: &Env,
    start: u32,
    limit: u32,
) -> Result<Vec<DoctorProfileView>, HospitalError> {
    validation::validate_page(limit)?;

    let mut doctors = Vec::new(env);
    for id in storage::page(env, storage::Index::Doctors, start, limit).iter() {
        let profile = storage::load_doctor_profile(env, id).ok_or(HospitalError::DoctorNotFound)?;
        doctors.push_back(doctor_view(env, profile)?);
    }
    Ok(doctors)
}

/// The doctors a patient can book with.
pub fn list_available_doctors(
    env: &Env,
    identity: &Identity,
    start: u32,
    limit: u32,
) -> Result<Vec<DoctorProfileView>, HospitalError> {
    policy::require_patient(identity)?;
    list_doctors(env, start, limit)
}

pub fn list_patients(
    env: &Env,
    identity: &Identity,
    start: u32,
    limit: u32,
) -> Result<Vec<PatientProfileView>, HospitalError> {
    policy::require_doctor(identity)?;
    validation::validate_page(limit)?;

    let mut patients = Vec::new(env);
    for id in storage::page(env, storage::Index::Patients, start, limit).iter() {
        let profile =
            storage::load_patient_profile(env, id).ok_or(HospitalError::PatientNotFound)?;
        patients.push_back(patient_view(env, profile)?);
    }
    Ok(patients)
}

// ── Own profile ────────────────────────────────────────────────

pub fn get_own(env: &Env, identity: &Identity) -> Result<Profile, HospitalError> {
    match *identity {
        Identity::Doctor { profile_id, .. } => {
            get_doctor(env, identity, profile_id).map(Profile::Doctor)
        }
        Identity::Patient { profile_id, .. } => {
            get_patient(env, identity, profile_id).map(Profile::Patient)
        }
    }
}

pub fn update_own(
    env: &Env,
    identity: &Identity,
    update: ProfileUpdate,
) -> Result<Profile, HospitalError> {
    match (*identity, update) {
        (Identity::Doctor { profile_id, .. }, ProfileUpdate::Doctor(update)) => {
            update_doctor(env, identity, profile_id, update).map(Profile::Doctor)
        }
        (Identity::Patient { profile_id, .. }, ProfileUpdate::Patient(update)) => {
            update_patient(env, identity, profile_id, update).map(Profile::Patient)
        }
        (Identity::Patient { .. }, ProfileUpdate::Doctor(_)) => Err(HospitalError::NotADoctor),
        (Identity::Doctor { .. }, ProfileUpdate::Patient(_)) => Err(HospitalError::NotAPatient),
    }
}

// ── Profiles by id ─────────────────────────────────────────────

fn owned_doctor_profile(
    env: &Env,
    identity: &Identity,
    profile_id: u64,
) -> Result<DoctorProfile, HospitalError> {
    policy::require_doctor(identity)?;
    let profile =
        storage::load_doctor_profile(env, profile_id).ok_or(HospitalError::DoctorNotFound)?;
    if !policy::is_profile_owner(identity, profile.user_id) {
        return Err(HospitalError::NotProfileOwner);
    }
    Ok(profile)
}

fn owned_patient_profile(
    env: &Env,
    identity: &Identity,
    profile_id: u64,
) -> Result<PatientProfile, HospitalError> {
    policy::require_patient(identity)?;
    let profile =
        storage::load_patient_profile(env, profile_id).ok_or(HospitalError::PatientNotFound)?;
    if !policy::is_profile_owner(identity, profile.user_id) {
        return Err(HospitalError::NotProfileOwner);
    }
    Ok(profile)
}

pub fn get_doctor(
    env: &Env,
    identity: &Identity,
    profile_id: u64,
) -> Result<DoctorProfileView, HospitalError> {
    let profile = owned_doctor_profile(env, identity, profile_id)?;
    doctor_view(env, profile)
}

pub fn update_doctor(
    env: &Env,
    identity: &Identity,
    profile_id: u64,
    update: DoctorProfileUpdate,
) -> Result<DoctorProfileView, HospitalError> {
    let mut profile = owned_doctor_profile(env, identity, profile_id)?;
    apply_doctor_update(&mut profile, update)?;

    storage::save_doctor_profile(env, &profile);
    events::publish_profile_updated(env, profile.user_id, Role::Doctor, profile.id);

    doctor_view(env, profile)
}

pub fn get_patient(
    env: &Env,
    identity: &Identity,
    profile_id: u64,
) -> Result<PatientProfileView, HospitalError> {
    let profile = owned_patient_profile(env, identity, profile_id)?;
    patient_view(env, profile)
}

pub fn update_patient(
    env: &Env,
    identity: &Identity,
    profile_id: u64,
    update: PatientProfileUpdate,
) -> Result<PatientProfileView, HospitalError> {
    let mut profile = owned_patient_profile(env, identity, profile_id)?;
    apply_patient_update(&mut profile, update)?;

    storage::save_patient_profile(env, &profile);
    events::publish_profile_updated(env, profile.user_id, Role::Patient, profile.id);

    patient_view(env, profile)
}
