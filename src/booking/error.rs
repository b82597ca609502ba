use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveTime;
use serde::Serialize;
use thiserror::Error;

use super::store::StoreError;
use crate::models::{BookingId, RoomId};

/// Field-keyed validation messages, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set holding a single message.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut messages = self.errors.values().flatten();
        match messages.next() {
            Some(first) => {
                write!(f, "{first}")?;
                let rest = messages.count();
                if rest > 0 {
                    write!(f, " (and {rest} more)")?;
                }
                Ok(())
            }
            None => write!(f, "no validation errors"),
        }
    }
}

impl std::error::Error for ValidationErrors {}

/// Everything that can go wrong when creating a booking or querying rooms.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("Bookings are only allowed between {} - {} UTC.", .opens_at.format("%H:%M"), .closes_at.format("%H:%M"))]
    OutsideWindow {
        opens_at: NaiveTime,
        closes_at: NaiveTime,
    },

    #[error("Room is already booked for the selected time.")]
    Conflict {
        room_id: RoomId,
        conflicting_id: BookingId,
    },

    /// The store was busy; the whole operation may be retried.
    #[error("storage temporarily unavailable: {0}")]
    TransientStore(#[source] StoreError),

    #[error("storage failure: {0}")]
    Store(#[source] StoreError),
}

impl BookingError {
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::TransientStore(_))
    }
}

impl From<StoreError> for BookingError {
    fn from(e: StoreError) -> Self {
        if e.is_transient() {
            Self::TransientStore(e)
        } else {
            Self::Store(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_group_messages_by_field() {
        let mut errors = ValidationErrors::new();
        errors.add("time", "The time field is required.");
        errors.add("date", "The date field is required.");
        errors.add("date", "second");

        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["date", "time"]);
        assert_eq!(errors.messages("date").len(), 2);
        assert!(errors.messages("room_id").is_empty());
        assert_eq!(errors.to_string(), "The date field is required. (and 2 more)");
    }

    #[test]
    fn window_error_names_the_bounds() {
        let error = BookingError::OutsideWindow {
            opens_at: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            closes_at: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Bookings are only allowed between 09:00 - 18:00 UTC."
        );
    }

    #[test]
    fn corrupt_rows_are_not_transient() {
        let error = BookingError::from(StoreError::Corrupt("bad date".into()));
        assert!(!error.is_transient());
        assert!(matches!(error, BookingError::Store(_)));
    }
}
