//! The persistence seam of the booking engine.

use chrono::NaiveDate;
use rusqlite::ErrorCode;
use thiserror::Error;

use crate::models::*;

/// Errors raised by a [`BookingStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database is busy or locked by another writer. Safe to retry.
    #[error("database busy: {0}")]
    Busy(#[source] rusqlite::Error),

    #[error("database error: {0}")]
    Sqlite(#[source] rusqlite::Error),

    /// A stored row could not be decoded into a domain value.
    #[error("corrupt row: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Busy(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        if let rusqlite::Error::FromSqlConversionFailure(..) = e {
            return Self::Corrupt(e.to_string());
        }
        match e.sqlite_error_code() {
            Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => Self::Busy(e),
            _ => Self::Sqlite(e),
        }
    }
}

/// The store of record for rooms and bookings.
///
/// Implementations must not cache: every call reflects committed state at
/// the time of the call. The conflict engine relies on this when it re-reads
/// a room's bookings under the room lock.
pub trait BookingStore: Send + Sync {
    fn find_room(&self, id: RoomId) -> Result<Option<Room>, StoreError>;

    /// All rooms, ordered by id.
    fn list_rooms(&self) -> Result<Vec<Room>, StoreError>;

    /// Bookings of one room whose `date` equals `date`.
    fn bookings_for_room_on(
        &self,
        room_id: RoomId,
        date: NaiveDate,
    ) -> Result<Vec<Booking>, StoreError>;

    /// Bookings of every room whose `date` equals `date`.
    fn bookings_on(&self, date: NaiveDate) -> Result<Vec<Booking>, StoreError>;

    /// All bookings, ordered by id.
    fn list_bookings(&self) -> Result<Vec<Booking>, StoreError>;

    /// Persist a booking and return it with its assigned id.
    fn insert_booking(&self, booking: NewBooking) -> Result<Booking, StoreError>;
}
