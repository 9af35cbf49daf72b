use soroban_sdk::String;

use crate::appointment::AppointmentStatus;
use crate::HospitalError;

pub const MAX_USERNAME_LEN: u32 = 150;
pub const MAX_NAME_LEN: u32 = 150;
pub const MAX_EMAIL_LEN: u32 = 254;
/// Specialty, medicine name and dosage.
pub const MAX_SHORT_TEXT_LEN: u32 = 100;
/// Bio, medical history, appointment notes and prescription instructions.
pub const MAX_LONG_TEXT_LEN: u32 = 2000;
/// Largest page a listing returns in one call.
pub const MAX_PAGE_LEN: u32 = 10;

const MAX_STATUS_LEN: usize = 16;

/// Usernames are 1..=150 bytes of letters, digits and `@.+-_`.
pub fn validate_username(username: &String) -> Result<(), HospitalError> {
    let len = username.len();
    if len == 0 || len > MAX_USERNAME_LEN {
        return Err(HospitalError::InvalidUsername);
    }

    let mut buf = [0u8; MAX_USERNAME_LEN as usize];
    username.copy_into_slice(&mut buf[..len as usize]);

    let valid = buf[..len as usize]
        .iter()
        .all(|&b| b.is_ascii_alphanumeric() || matches!(b, b'@' | b'.' | b'+' | b'-' | b'_'));
    if !valid {
        return Err(HospitalError::InvalidUsername);
    }
    Ok(())
}

/// Email may be left empty; otherwise it needs a local part, an `@` and a
/// dotted domain, with no whitespace.
pub fn validate_email(email: &String) -> Result<(), HospitalError> {
    let len = email.len();
    if len == 0 {
        return Ok(());
    }
    if len > MAX_EMAIL_LEN {
        return Err(HospitalError::InvalidEmail);
    }

    let mut buf = [0u8; MAX_EMAIL_LEN as usize];
    email.copy_into_slice(&mut buf[..len as usize]);
    if is_plausible_email(&buf[..len as usize]) {
        Ok(())
    } else {
        Err(HospitalError::InvalidEmail)
    }
}

fn is_plausible_email(raw: &[u8]) -> bool {
    if raw.iter().any(|b| !b.is_ascii_graphic()) {
        return false;
    }
    let mut parts = raw.split(|b| *b == b'@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && domain.contains(&b'.')
        && domain.first() != Some(&b'.')
        && domain.last() != Some(&b'.')
}

/// First/last names are optional and bounded.
pub fn validate_name(name: &String) -> Result<(), HospitalError> {
    if name.len() > MAX_NAME_LEN {
        return Err(HospitalError::InvalidInput);
    }
    Ok(())
}

/// Required short text: non-empty, at most [`MAX_SHORT_TEXT_LEN`] bytes.
pub fn validate_short_text(text: &String) -> Result<(), HospitalError> {
    let len = text.len();
    if len == 0 || len > MAX_SHORT_TEXT_LEN {
        return Err(HospitalError::InvalidInput);
    }
    Ok(())
}

/// Free text, bounded by [`MAX_LONG_TEXT_LEN`]. Emptiness is the caller's call.
pub fn validate_long_text(text: &String) -> Result<(), HospitalError> {
    if text.len() > MAX_LONG_TEXT_LEN {
        return Err(HospitalError::InvalidInput);
    }
    Ok(())
}

/// Parses a status submitted by a doctor. Only the targets a doctor can move
/// an appointment to are accepted; `pending` is not one of them.
pub fn parse_status_update(status: &String) -> Result<AppointmentStatus, HospitalError> {
    let len = status.len() as usize;
    if len == 0 || len > MAX_STATUS_LEN {
        return Err(HospitalError::InvalidStatus);
    }
    let mut buf = [0u8; MAX_STATUS_LEN];
    status.copy_into_slice(&mut buf[..len]);

    match &buf[..len] {
        b"confirmed" => Ok(AppointmentStatus::Confirmed),
        b"cancelled" => Ok(AppointmentStatus::Cancelled),
        b"completed" => Ok(AppointmentStatus::Completed),
        _ => Err(HospitalError::InvalidStatus),
    }
}

pub fn validate_page(limit: u32) -> Result<(), HospitalError> {
    if limit == 0 || limit > MAX_PAGE_LEN {
        return Err(HospitalError::InvalidPage);
    }
    Ok(())
}
