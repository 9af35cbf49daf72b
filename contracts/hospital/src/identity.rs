use soroban_sdk::{contracttype, Address, Bytes, BytesN, Env, String};

use crate::events;
use crate::profile::{self, ProfileDetails};
use crate::storage;
use crate::validation::{self, MAX_USERNAME_LEN};
use crate::HospitalError;

/// Domain separator mixed into every stored password digest.
const PASSWORD_DOMAIN: &[u8] = b"hospital.pwd";

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    Doctor,
    Patient,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct User {
    pub id: u64,
    pub account: Address,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: BytesN<32>,
    pub role: Role,
    pub registered_at: u64,
}

/// A user as returned to callers. Never carries the password digest.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserView {
    pub id: u64,
    pub account: Address,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub registered_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Key derived from the password on the client. The plaintext password
    /// never reaches the contract.
    pub password_verifier: BytesN<32>,
    pub role: Role,
    pub profile: ProfileDetails,
}

impl User {
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id,
            account: self.account.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            role: self.role,
            registered_at: self.registered_at,
        }
    }
}

/// The authenticated caller of an operation, resolved once per call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Identity {
    Doctor { user_id: u64, profile_id: u64 },
    Patient { user_id: u64, profile_id: u64 },
}

impl Identity {
    pub fn user_id(&self) -> u64 {
        match self {
            Identity::Doctor { user_id, .. } | Identity::Patient { user_id, .. } => *user_id,
        }
    }

    pub fn profile_id(&self) -> u64 {
        match self {
            Identity::Doctor { profile_id, .. } | Identity::Patient { profile_id, .. } => {
                *profile_id
            }
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Identity::Doctor { .. } => Role::Doctor,
            Identity::Patient { .. } => Role::Patient,
        }
    }
}

/// Requires the account's signature and resolves it to a registered user
/// with its role profile.
pub fn authenticate(env: &Env, account: &Address) -> Result<Identity, HospitalError> {
    account.require_auth();

    let user_id = storage::user_id_for_account(env, account).ok_or(HospitalError::NotRegistered)?;
    let user = storage::load_user(env, user_id).ok_or(HospitalError::UserNotFound)?;

    match user.role {
        Role::Doctor => {
            let profile_id = storage::doctor_profile_id_for_user(env, user_id)
                .ok_or(HospitalError::DoctorNotFound)?;
            Ok(Identity::Doctor {
                user_id,
                profile_id,
            })
        }
        Role::Patient => {
            let profile_id = storage::patient_profile_id_for_user(env, user_id)
                .ok_or(HospitalError::PatientNotFound)?;
            Ok(Identity::Patient {
                user_id,
                profile_id,
            })
        }
    }
}

/// Creates a user and its role profile in one step. Nothing is written
/// unless every field validates.
pub fn register(
    env: &Env,
    account: &Address,
    registration: Registration,
) -> Result<UserView, HospitalError> {
    account.require_auth();

    validation::validate_username(&registration.username)?;
    validation::validate_email(&registration.email)?;
    validation::validate_name(&registration.first_name)?;
    validation::validate_name(&registration.last_name)?;
    if registration.password_verifier.to_array() == [0u8; 32] {
        return Err(HospitalError::InvalidPassword);
    }

    if storage::user_id_for_account(env, account).is_some() {
        return Err(HospitalError::AccountExists);
    }
    if storage::user_id_for_username(env, &registration.username).is_some() {
        return Err(HospitalError::UsernameTaken);
    }

    let new_profile = profile::prepare(env, registration.role, registration.profile)?;

    let password_hash =
        hash_password(env, &registration.username, &registration.password_verifier);
    let user = User {
        id: storage::next_user_id(env),
        account: account.clone(),
        password_hash,
        username: registration.username,
        email: registration.email,
        first_name: registration.first_name,
        last_name: registration.last_name,
        role: registration.role,
        registered_at: env.ledger().timestamp(),
    };
    storage::insert_user(env, &user);
    profile::provision(env, user.id, new_profile);

    events::publish_user_registered(env, &user);

    Ok(user.view())
}

pub fn current_user(env: &Env, identity: &Identity) -> Result<UserView, HospitalError> {
    storage::load_user(env, identity.user_id())
        .map(|user| user.view())
        .ok_or(HospitalError::UserNotFound)
}

/// Checks a username and password verifier. Unknown usernames and wrong
/// passwords are indistinguishable to the caller.
pub fn verify_credentials(
    env: &Env,
    username: &String,
    verifier: &BytesN<32>,
) -> Result<UserView, HospitalError> {
    if username.len() > MAX_USERNAME_LEN {
        return Err(HospitalError::InvalidCredentials);
    }
    let user = storage::user_id_for_username(env, username)
        .and_then(|user_id| storage::load_user(env, user_id))
        .ok_or(HospitalError::InvalidCredentials)?;

    if hash_password(env, username, verifier) != user.password_hash {
        return Err(HospitalError::InvalidCredentials);
    }
    Ok(user.view())
}

/// `sha256(domain ‖ username ‖ 0x00 ‖ verifier)`. The username must already
/// be within its length limit.
fn hash_password(env: &Env, username: &String, verifier: &BytesN<32>) -> BytesN<32> {
    let mut payload = Bytes::from_slice(env, PASSWORD_DOMAIN);
    append_string(&mut payload, username);
    payload.push_back(0);
    payload.extend_from_slice(&verifier.to_array());
    env.crypto().sha256(&payload).into()
}

fn append_string(payload: &mut Bytes, value: &String) {
    const BUF_LEN: usize = MAX_USERNAME_LEN as usize;
    let len = (value.len() as usize).min(BUF_LEN);
    let mut buf = [0u8; BUF_LEN];
    value.copy_into_slice(&mut buf[..len]);
    payload.extend_from_slice(&buf[..len]);
}
