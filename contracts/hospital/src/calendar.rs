//! Calendar values stored on appointments and patient profiles, and the
//! parsers for the textual forms callers submit.
//!
//! Accepted inputs:
//! - dates: `YYYY-MM-DD` and `MM/DD/YYYY` (birth dates: `YYYY-MM-DD` only)
//! - times: `HH:MM`, `HH:MM:SS` and `HH:MM AM|PM`

use soroban_sdk::{contracttype, String};

/// Longest accepted textual date or time (`12/31/2025`, `23:59:59`, `11:30 PM`).
const MAX_INPUT_LEN: usize = 16;

/// A calendar date. Field order gives chronological ordering.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct Date {
    pub year: u32,
    pub month: u32,
    pub day: u32,
}

/// A wall-clock time of day. Field order gives chronological ordering.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

/// A date that may not have been fixed yet. `Unset` orders before any date.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum DateSlot {
    Unset,
    On(Date),
}

/// A time of day that may not have been fixed yet. `Unset` orders before any time.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum TimeSlot {
    Unset,
    At(TimeOfDay),
}

impl DateSlot {
    pub fn get(self) -> Option<Date> {
        match self {
            DateSlot::Unset => None,
            DateSlot::On(date) => Some(date),
        }
    }
}

impl From<Option<Date>> for DateSlot {
    fn from(date: Option<Date>) -> Self {
        date.map_or(DateSlot::Unset, DateSlot::On)
    }
}

impl TimeSlot {
    pub fn get(self) -> Option<TimeOfDay> {
        match self {
            TimeSlot::Unset => None,
            TimeSlot::At(time) => Some(time),
        }
    }
}

impl From<Option<TimeOfDay>> for TimeSlot {
    fn from(time: Option<TimeOfDay>) -> Self {
        time.map_or(TimeSlot::Unset, TimeSlot::At)
    }
}

impl Date {
    /// Builds a date, rejecting anything that is not a real calendar day.
    pub fn new(year: u32, month: u32, day: u32) -> Option<Date> {
        if !(1..=9999).contains(&year) || !(1..=12).contains(&month) {
            return None;
        }
        if day == 0 || day > days_in_month(year, month) {
            return None;
        }
        Some(Date { year, month, day })
    }
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32, second: u32) -> Option<TimeOfDay> {
        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }
        Some(TimeOfDay {
            hour,
            minute,
            second,
        })
    }
}

fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Parses an appointment date in either `YYYY-MM-DD` or `MM/DD/YYYY` form.
pub fn parse_date(input: &String) -> Option<Date> {
    with_ascii(input, parse_date_bytes)
}

/// Parses a birth date; only the ISO `YYYY-MM-DD` form is accepted.
pub fn parse_iso_date(input: &String) -> Option<Date> {
    with_ascii(input, parse_iso_date_bytes)
}

/// Parses an appointment time in `HH:MM`, `HH:MM:SS` or `HH:MM AM|PM` form.
pub fn parse_time(input: &String) -> Option<TimeOfDay> {
    with_ascii(input, parse_time_bytes)
}

fn with_ascii<T>(input: &String, parse: fn(&[u8]) -> Option<T>) -> Option<T> {
    let len = input.len() as usize;
    if len == 0 || len > MAX_INPUT_LEN {
        return None;
    }
    let mut buf = [0u8; MAX_INPUT_LEN];
    input.copy_into_slice(&mut buf[..len]);
    parse(&buf[..len])
}

pub fn parse_date_bytes(raw: &[u8]) -> Option<Date> {
    parse_iso_date_bytes(raw).or_else(|| parse_us_date_bytes(raw))
}

pub fn parse_iso_date_bytes(raw: &[u8]) -> Option<Date> {
    let (year, month, day) = split3(raw, b'-')?;
    if year.len() != 4 {
        return None;
    }
    Date::new(number(year, 4)?, number(month, 2)?, number(day, 2)?)
}

fn parse_us_date_bytes(raw: &[u8]) -> Option<Date> {
    let (month, day, year) = split3(raw, b'/')?;
    if year.len() != 4 {
        return None;
    }
    Date::new(number(year, 4)?, number(month, 2)?, number(day, 2)?)
}

pub fn parse_time_bytes(raw: &[u8]) -> Option<TimeOfDay> {
    match split_meridiem(raw) {
        Some((clock, is_pm)) => {
            let mut parts = clock.split(|b| *b == b':');
            let hour = number(parts.next()?, 2)?;
            let minute = number(parts.next()?, 2)?;
            if parts.next().is_some() || !(1..=12).contains(&hour) {
                return None;
            }
            let hour = match (hour, is_pm) {
                (12, false) => 0,
                (12, true) => 12,
                (h, true) => h + 12,
                (h, false) => h,
            };
            TimeOfDay::new(hour, minute, 0)
        }
        None => {
            let mut parts = raw.split(|b| *b == b':');
            let hour = number(parts.next()?, 2)?;
            let minute = number(parts.next()?, 2)?;
            let second = match parts.next() {
                Some(s) => number(s, 2)?,
                None => 0,
            };
            if parts.next().is_some() {
                return None;
            }
            TimeOfDay::new(hour, minute, second)
        }
    }
}

/// Splits a trailing ` AM`/` PM` marker (case-insensitive) off a 12-hour time.
fn split_meridiem(raw: &[u8]) -> Option<(&[u8], bool)> {
    if raw.len() < 4 || raw[raw.len() - 3] != b' ' {
        return None;
    }
    let (clock, marker) = raw.split_at(raw.len() - 3);
    let is_pm = match (marker[1].to_ascii_uppercase(), marker[2].to_ascii_uppercase()) {
        (b'A', b'M') => false,
        (b'P', b'M') => true,
        _ => return None,
    };
    Some((clock, is_pm))
}

fn split3(raw: &[u8], sep: u8) -> Option<(&[u8], &[u8], &[u8])> {
    let mut parts = raw.split(|b| *b == sep);
    let first = parts.next()?;
    let second = parts.next()?;
    let third = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((first, second, third))
}

/// Decimal digits only, between 1 and `max_digits` of them.
fn number(digits: &[u8], max_digits: usize) -> Option<u32> {
    if digits.is_empty() || digits.len() > max_digits {
        return None;
    }
    let mut value = 0u32;
    for &b in digits {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value * 10 + u32::from(b - b'0');
    }
    Some(value)
}
