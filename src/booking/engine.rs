use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;

use super::error::BookingError;
use super::request::ReservationRequest;
use super::store::BookingStore;
use crate::models::*;

/// Decides whether a booking collides with existing ones and inserts it if not.
///
/// Check-then-insert for a room runs under that room's lock, so two
/// overlapping requests for the same room can never both succeed. Requests
/// for different rooms take different locks and proceed in parallel. This
/// holds only while this process is the sole writer to the store.
pub struct ConflictEngine<S> {
    store: S,
    room_locks: DashMap<RoomId, Arc<Mutex<()>>>,
}

impl<S: BookingStore> ConflictEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            room_locks: DashMap::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reserve the requested span, failing with [`BookingError::Conflict`] if
    /// any booking of the same room on the same date overlaps it.
    pub fn try_reserve(&self, request: &ReservationRequest) -> Result<Booking, BookingError> {
        let lock = self.room_lock(request.room_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let existing = self
            .store
            .bookings_for_room_on(request.room_id, request.date)?;

        if let Some(clash) = existing.iter().find(|b| b.span().overlaps(&request.span)) {
            tracing::debug!(
                room_id = request.room_id,
                conflicting_id = clash.id,
                "Rejected overlapping booking"
            );
            return Err(BookingError::Conflict {
                room_id: request.room_id,
                conflicting_id: clash.id,
            });
        }

        let booking = self.store.insert_booking(request.clone().into_new_booking())?;
        Ok(booking)
    }

    /// Rooms with no booking on `date` covering `instant`, ordered by id.
    ///
    /// Reads without locking; bookings being inserted concurrently may or
    /// may not be seen.
    pub fn available_rooms(
        &self,
        date: NaiveDate,
        instant: DateTime<Utc>,
    ) -> Result<Vec<Room>, BookingError> {
        let rooms = self.store.list_rooms()?;
        let bookings = self.store.bookings_on(date)?;

        Ok(rooms
            .into_iter()
            .filter(|room| {
                !bookings
                    .iter()
                    .any(|b| b.room_id == room.id && b.span().covers(instant))
            })
            .collect())
    }

    fn room_lock(&self, room_id: RoomId) -> Arc<Mutex<()>> {
        self.room_locks.entry(room_id).or_default().clone()
    }
}
