//! Turns raw client input into typed, validated requests.
//!
//! Wire formats are strict: dates are `YYYY-MM-DD`, instants are
//! `YYYY-MM-DDTHH:MM:SSZ` (UTC designator required, offsets rejected) and
//! lookup times are `HH:MM`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use super::error::ValidationErrors;
use crate::models::*;

const DATE_SHAPE: &str = "dddd-dd-dd";
const INSTANT_SHAPE: &str = "dddd-dd-ddTdd:dd:ddZ";
const TIME_SHAPE: &str = "dd:dd";

/// A booking request whose fields are present, well-formed and consistent.
///
/// The room is not yet known to exist; that needs the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRequest {
    pub room_id: RoomId,
    pub user_name: String,
    pub date: NaiveDate,
    pub span: TimeSpan,
}

impl ReservationRequest {
    /// Validate every field, collecting all problems rather than stopping at the first.
    pub fn parse(input: CreateBookingInput) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let room_id = match input.room_id {
            Some(id) if id > 0 => Some(id),
            Some(_) => {
                errors.add("room_id", "The selected room id is invalid.");
                None
            }
            None => {
                errors.add("room_id", "The room id field is required.");
                None
            }
        };

        let user_name = match input.user_name.map(|s| s.trim().to_string()) {
            Some(name) if !name.is_empty() => Some(name),
            _ => {
                errors.add("user_name", "The user name field is required.");
                None
            }
        };

        let date = required(&mut errors, "date", input.date.as_deref(), parse_date);
        let start = required(&mut errors, "start_time", input.start_time.as_deref(), parse_instant);
        let end = required(&mut errors, "end_time", input.end_time.as_deref(), parse_instant);

        let span = match (start, end) {
            (Some(start), Some(end)) => {
                let span = TimeSpan::new(start, end);
                if span.is_none() {
                    errors.add("end_time", "The end time field must be a date after start time.");
                }
                span
            }
            _ => None,
        };

        if let (Some(date), Some(span)) = (date, span) {
            if span.start.date_naive() != date {
                errors.add("start_time", "The start time field must fall on the booking date.");
            }
            if span.end.date_naive() != date {
                errors.add("end_time", "The end time field must fall on the booking date.");
            }
        }

        match (room_id, user_name, date, span) {
            (Some(room_id), Some(user_name), Some(date), Some(span)) if errors.is_empty() => {
                Ok(Self {
                    room_id,
                    user_name,
                    date,
                    span,
                })
            }
            _ => Err(errors),
        }
    }

    pub fn into_new_booking(self) -> NewBooking {
        NewBooking {
            room_id: self.room_id,
            user_name: self.user_name,
            date: self.date,
            span: self.span,
        }
    }
}

/// A validated availability lookup: which rooms are free at `instant` on `date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityRequest {
    pub date: NaiveDate,
    pub instant: DateTime<Utc>,
}

impl AvailabilityRequest {
    pub fn parse(query: AvailableRoomsQuery) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let date = required(&mut errors, "date", query.date.as_deref(), parse_date);
        let time = required(&mut errors, "time", query.time.as_deref(), parse_time);

        match (date, time) {
            (Some(date), Some(time)) => Ok(Self {
                date,
                instant: date.and_time(time).and_utc(),
            }),
            _ => Err(errors),
        }
    }
}

fn required<T>(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    parse: fn(&str) -> Option<T>,
) -> Option<T> {
    let label = field.replace('_', " ");
    match value.map(str::trim) {
        None | Some("") => {
            errors.add(field, format!("The {label} field is required."));
            None
        }
        Some(raw) => {
            let parsed = parse(raw);
            if parsed.is_none() {
                errors.add(field, format!("The {label} field format is invalid."));
            }
            parsed
        }
    }
}

/// Check `s` against a shape where `d` stands for any ASCII digit and every
/// other byte must match literally.
fn has_shape(s: &str, shape: &str) -> bool {
    s.len() == shape.len()
        && s.bytes().zip(shape.bytes()).all(|(c, p)| match p {
            b'd' => c.is_ascii_digit(),
            _ => c == p,
        })
}

pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    if !has_shape(s, DATE_SHAPE) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

pub(crate) fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    if !has_shape(s, INSTANT_SHAPE) {
        return None;
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%SZ")
        .ok()
        .map(|dt| dt.and_utc())
}

pub(crate) fn parse_time(s: &str) -> Option<NaiveTime> {
    if !has_shape(s, TIME_SHAPE) {
        return None;
    }
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}
