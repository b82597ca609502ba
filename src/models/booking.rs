use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::room::RoomId;
use super::span::TimeSpan;

/// Identifier of a [`Booking`], assigned by the store on insert.
pub type BookingId = i64;

/// A committed reservation of a room.
///
/// `start_time` and `end_time` are UTC instants on `date`, with
/// `start_time < end_time`. Bookings are never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub room_id: RoomId,
    /// Free-form label for whoever made the booking.
    pub user_name: String,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// The half-open interval this booking occupies.
    pub fn span(&self) -> TimeSpan {
        TimeSpan {
            start: self.start_time,
            end: self.end_time,
        }
    }
}

/// A booking that passed validation and the conflict check, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub room_id: RoomId,
    pub user_name: String,
    pub date: NaiveDate,
    pub span: TimeSpan,
}

/// Raw input for creating a booking, as received from a client.
///
/// Every field is optional so that missing fields are reported as
/// validation errors instead of deserialization failures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBookingInput {
    pub room_id: Option<RoomId>,
    pub user_name: Option<String>,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    /// `YYYY-MM-DDTHH:MM:SSZ`
    pub start_time: Option<String>,
    /// `YYYY-MM-DDTHH:MM:SSZ`
    pub end_time: Option<String>,
}

/// Raw query for the availability lookup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailableRoomsQuery {
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    /// `HH:MM`
    pub time: Option<String>,
}
