use soroban_sdk::{contracterror, log, Address, Env, Symbol};

/// Contract errors.
///
/// Codes are grouped by the class of failure a transport layer reports:
/// 1xx validation, 2xx missing entity, 3xx forbidden, 4xx conflict.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum HospitalError {
    InvalidInput = 100,
    InvalidUsername = 101,
    UsernameTaken = 102,
    InvalidEmail = 103,
    InvalidPassword = 104,
    RoleMismatch = 105,
    InvalidStatus = 106,
    InvalidDate = 107,
    InvalidTime = 108,
    ReadOnlyField = 109,
    InvalidPage = 110,

    UserNotFound = 200,
    DoctorNotFound = 201,
    PatientNotFound = 202,
    AppointmentNotFound = 203,
    PrescriptionNotFound = 204,

    NotRegistered = 300,
    NotADoctor = 301,
    NotAPatient = 302,
    NotAssignedDoctor = 303,
    NotAParticipant = 304,
    NotProfileOwner = 305,
    InvalidCredentials = 306,

    AccountExists = 400,
    PrescriptionExists = 401,
    InvalidTransition = 402,
}

/// Failure classes exposed to callers.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Forbidden,
    Conflict,
}

impl ErrorKind {
    /// HTTP-equivalent status a transport maps this class to.
    pub fn status_code(self) -> u32 {
        match self {
            ErrorKind::Validation => 400,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
        }
    }
}

impl HospitalError {
    pub fn kind(self) -> ErrorKind {
        match self as u32 {
            100..=199 => ErrorKind::Validation,
            200..=299 => ErrorKind::NotFound,
            300..=399 => ErrorKind::Forbidden,
            _ => ErrorKind::Conflict,
        }
    }
}

/// Writes a diagnostic log line for a rejected operation and hands the
/// error back so call sites can return it directly.
pub fn log_error(env: &Env, caller: &Address, operation: &str, error: HospitalError) -> HospitalError {
    log!(
        env,
        "operation rejected",
        Symbol::new(env, operation),
        caller.clone(),
        error as u32
    );
    error
}
