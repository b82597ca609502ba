//! Room booking core: window policy, request validation and the conflict engine.
//!
//! [`BookingService`] is the entry point used by the HTTP layer. It runs a
//! create request through three stages:
//!
//! 1. [`ReservationRequest::parse`] turns raw input into typed values or a
//!    [`ValidationErrors`] bag keyed by field.
//! 2. [`BookingWindow::is_within_window`] rejects spans outside the daily window.
//! 3. [`ConflictEngine::try_reserve`] checks for overlaps and inserts, atomically per room.

mod engine;
mod error;
mod request;
mod store;
mod window;

pub use engine::ConflictEngine;
pub use error::{BookingError, ValidationErrors};
pub use request::{AvailabilityRequest, ReservationRequest};
pub use store::{BookingStore, StoreError};
pub use window::{BookingWindow, InvalidWindow};

use std::sync::Arc;

use crate::models::*;

/// Total attempts for a create that keeps hitting a busy store.
const MAX_ATTEMPTS: u32 = 3;

/// Booking operations exposed to request handlers.
pub struct BookingService<S> {
    window: BookingWindow,
    engine: Arc<ConflictEngine<S>>,
}

impl<S> Clone for BookingService<S> {
    fn clone(&self) -> Self {
        Self {
            window: self.window,
            engine: self.engine.clone(),
        }
    }
}

impl<S: BookingStore> BookingService<S> {
    pub fn new(store: S, window: BookingWindow) -> Self {
        Self {
            window,
            engine: Arc::new(ConflictEngine::new(store)),
        }
    }

    pub fn create_booking(&self, input: CreateBookingInput) -> Result<Booking, BookingError> {
        let request = ReservationRequest::parse(input)?;

        if self.engine.store().find_room(request.room_id)?.is_none() {
            return Err(ValidationErrors::single("room_id", "The selected room id is invalid.").into());
        }

        if !self
            .window
            .is_within_window(request.date, request.span.start, request.span.end)
        {
            return Err(BookingError::OutsideWindow {
                opens_at: self.window.opens_at(),
                closes_at: self.window.closes_at(),
            });
        }

        let mut attempt = 1;
        loop {
            match self.engine.try_reserve(&request) {
                Err(e) if e.is_transient() && attempt < MAX_ATTEMPTS => {
                    tracing::warn!(
                        room_id = request.room_id,
                        attempt,
                        "Store busy while booking, retrying: {}",
                        e
                    );
                    attempt += 1;
                }
                Ok(booking) => {
                    tracing::info!(
                        booking_id = booking.id,
                        room_id = booking.room_id,
                        "Booked {} - {} on {}",
                        booking.start_time,
                        booking.end_time,
                        booking.date
                    );
                    return Ok(booking);
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub fn list_bookings(&self) -> Result<Vec<Booking>, BookingError> {
        Ok(self.engine.store().list_bookings()?)
    }

    pub fn list_rooms(&self) -> Result<Vec<Room>, BookingError> {
        Ok(self.engine.store().list_rooms()?)
    }

    pub fn available_rooms(&self, query: AvailableRoomsQuery) -> Result<Vec<Room>, BookingError> {
        let request = AvailabilityRequest::parse(query)?;
        self.engine.available_rooms(request.date, request.instant)
    }
}
