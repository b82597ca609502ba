mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, SecondsFormat, SubsecRound, Utc};
use rusqlite::{Connection, Row};

use crate::booking::{BookingStore, StoreError};
use crate::models::*;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const BOOKING_COLUMNS: &str = "id, room_id, user_name, date, start_time, end_time, created_at";

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::configure(conn)
    }

    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    pub fn open_memory() -> Result<Self> {
        Self::configure(Connection::open_in_memory()?)
    }

    /// Location of the database when none is configured.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "roombook")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().join("roombook.db"))
    }

    fn configure(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.lock();
        schema::run_migrations(&conn)
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("database lock poisoned")
    }

    // ============================================================
    // Room operations
    // ============================================================

    pub fn get_all_rooms(&self) -> Result<Vec<Room>, StoreError> {
        let conn = self.lock();
        let mut stmt = conn.prepare("SELECT id, name, created_at FROM rooms ORDER BY id")?;

        let rooms = stmt
            .query_map([], room_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rooms)
    }

    pub fn get_room(&self, id: RoomId) -> Result<Option<Room>, StoreError> {
        let conn = self.lock();
        let mut stmt = conn.prepare("SELECT id, name, created_at FROM rooms WHERE id = ?")?;

        let mut rows = stmt.query([id])?;
        let room = match rows.next()? {
            Some(row) => Some(room_from_row(row)?),
            None => None,
        };
        Ok(room)
    }

    pub fn create_room(&self, input: CreateRoomInput) -> Result<Room, StoreError> {
        let conn = self.lock();
        let now = Utc::now().trunc_subsecs(0);

        conn.execute(
            "INSERT INTO rooms (name, created_at) VALUES (?, ?)",
            (&input.name, format_instant(now)),
        )?;

        Ok(Room {
            id: conn.last_insert_rowid(),
            name: input.name,
            created_at: now,
        })
    }

    // ============================================================
    // Booking operations
    // ============================================================

    pub fn get_all_bookings(&self) -> Result<Vec<Booking>, StoreError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(&format!("SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY id"))?;

        let bookings = stmt
            .query_map([], booking_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(bookings)
    }

    pub fn get_bookings_on(&self, date: NaiveDate) -> Result<Vec<Booking>, StoreError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE date = ? ORDER BY room_id, start_time"
        ))?;

        let bookings = stmt
            .query_map([format_date(date)], booking_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(bookings)
    }

    pub fn get_room_bookings_on(
        &self,
        room_id: RoomId,
        date: NaiveDate,
    ) -> Result<Vec<Booking>, StoreError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE room_id = ? AND date = ? ORDER BY start_time"
        ))?;

        let bookings = stmt
            .query_map((room_id, format_date(date)), booking_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(bookings)
    }

    pub fn create_booking(&self, input: NewBooking) -> Result<Booking, StoreError> {
        let conn = self.lock();
        let now = Utc::now().trunc_subsecs(0);

        conn.execute(
            "INSERT INTO bookings (room_id, user_name, date, start_time, end_time, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                input.room_id,
                &input.user_name,
                format_date(input.date),
                format_instant(input.span.start),
                format_instant(input.span.end),
                format_instant(now),
            ),
        )?;

        Ok(Booking {
            id: conn.last_insert_rowid(),
            room_id: input.room_id,
            user_name: input.user_name,
            date: input.date,
            start_time: input.span.start,
            end_time: input.span.end,
            created_at: now,
        })
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

impl BookingStore for Database {
    fn find_room(&self, id: RoomId) -> Result<Option<Room>, StoreError> {
        self.get_room(id)
    }

    fn list_rooms(&self) -> Result<Vec<Room>, StoreError> {
        self.get_all_rooms()
    }

    fn bookings_for_room_on(
        &self,
        room_id: RoomId,
        date: NaiveDate,
    ) -> Result<Vec<Booking>, StoreError> {
        self.get_room_bookings_on(room_id, date)
    }

    fn bookings_on(&self, date: NaiveDate) -> Result<Vec<Booking>, StoreError> {
        self.get_bookings_on(date)
    }

    fn list_bookings(&self) -> Result<Vec<Booking>, StoreError> {
        self.get_all_bookings()
    }

    fn insert_booking(&self, booking: NewBooking) -> Result<Booking, StoreError> {
        self.create_booking(booking)
    }
}

fn room_from_row(row: &Row<'_>) -> rusqlite::Result<Room> {
    Ok(Room {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: parse_instant(row, 2)?,
    })
}

fn booking_from_row(row: &Row<'_>) -> rusqlite::Result<Booking> {
    Ok(Booking {
        id: row.get(0)?,
        room_id: row.get(1)?,
        user_name: row.get(2)?,
        date: parse_date(row, 3)?,
        start_time: parse_instant(row, 4)?,
        end_time: parse_instant(row, 5)?,
        created_at: parse_instant(row, 6)?,
    })
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Instants are stored as RFC 3339 with a `Z` suffix and whole seconds, so
/// they sort lexically in time order.
fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn parse_date(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let s: String = row.get(idx)?;
    NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|e| conversion_error(idx, e))
}

fn parse_instant(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let s: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(idx, e))
}

fn conversion_error(
    idx: usize,
    e: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
}
