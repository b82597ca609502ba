//! Domain models for roombook.
//!
//! # Core Concepts
//!
//! - [`Room`]: A bookable resource. Rooms are seeded by migrations or created
//!   administratively; the booking engine only reads them.
//! - [`Booking`]: A committed reservation of one room for a half-open
//!   interval on a single day. Bookings of the same room never overlap.
//! - [`TimeSpan`]: The half-open `[start, end)` interval both the overlap test
//!   and the point-coverage test are defined on.

mod booking;
mod room;
mod span;

pub use booking::*;
pub use room::*;
pub use span::*;
