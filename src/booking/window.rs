use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use thiserror::Error;

/// The daily stretch of time during which rooms may be booked.
///
/// Both bounds are UTC times of day and both are inclusive: a booking may
/// start exactly at opening and end exactly at closing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    opens_at: NaiveTime,
    closes_at: NaiveTime,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("booking window must open before it closes (got {opens_at} - {closes_at})")]
pub struct InvalidWindow {
    pub opens_at: NaiveTime,
    pub closes_at: NaiveTime,
}

impl BookingWindow {
    pub fn new(opens_at: NaiveTime, closes_at: NaiveTime) -> Result<Self, InvalidWindow> {
        if opens_at >= closes_at {
            return Err(InvalidWindow {
                opens_at,
                closes_at,
            });
        }
        Ok(Self {
            opens_at,
            closes_at,
        })
    }

    pub fn opens_at(&self) -> NaiveTime {
        self.opens_at
    }

    pub fn closes_at(&self) -> NaiveTime {
        self.closes_at
    }

    /// The first bookable instant of `day`.
    pub fn opens_on(&self, day: NaiveDate) -> DateTime<Utc> {
        day.and_time(self.opens_at).and_utc()
    }

    /// The last bookable instant of `day`.
    pub fn closes_on(&self, day: NaiveDate) -> DateTime<Utc> {
        day.and_time(self.closes_at).and_utc()
    }

    /// True if `[start, end)` lies within the window on `day`.
    ///
    /// Callers guarantee `start < end`.
    pub fn is_within_window(&self, day: NaiveDate, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start >= self.opens_on(day) && end <= self.closes_on(day)
    }
}

impl Default for BookingWindow {
    /// 09:00 - 18:00 UTC.
    fn default() -> Self {
        Self {
            opens_at: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
            closes_at: NaiveTime::from_hms_opt(18, 0, 0).expect("valid time"),
        }
    }
}

impl fmt::Display for BookingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} UTC",
            self.opens_at.format("%H:%M"),
            self.closes_at.format("%H:%M")
        )
    }
}
