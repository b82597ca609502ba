use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a [`Room`], assigned by the store.
pub type RoomId = i64;

/// A bookable room.
///
/// Rooms own their bookings only in the sense that deleting a room cascades
/// to its bookings. The name is immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a room out-of-band (seeding, administration).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomInput {
    pub name: String,
}

/// The public shape of a room in availability results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub id: RoomId,
    pub name: String,
}

impl From<Room> for RoomSummary {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            name: room.name,
        }
    }
}
