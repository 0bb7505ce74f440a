use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A candidate bookable interval, `[start, start + duration)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start: DateTime<Utc>,
    pub duration_minutes: i64,
}

impl Slot {
    pub fn new(start: DateTime<Utc>, duration_minutes: i64) -> Self {
        Self {
            start,
            duration_minutes,
        }
    }

    /// End of the slot; saturates at the latest representable instant.
    pub fn end(&self) -> DateTime<Utc> {
        Duration::try_minutes(self.duration_minutes)
            .and_then(|duration| self.start.checked_add_signed(duration))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// An existing reservation supplied by the booking store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedInterval {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl BookedInterval {
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            end_time,
        }
    }
}

/// Local working hours for a resource, as two `HH:mm` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: String,
    pub end: String,
}

impl WorkingHours {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Window, duration and bookings for listing free slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableSlotsRequest {
    pub start: String,
    pub end: String,
    pub duration: i64,
    pub date: NaiveDate,
    pub timezone: String,
    #[serde(default)]
    pub booked: Vec<BookedInterval>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotResponse {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// `start` rendered in the requested timezone, ISO-8601 with offset.
    pub local_start: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotsResponse {
    pub date: NaiveDate,
    pub timezone: String,
    pub duration: i64,
    pub slots: Vec<SlotResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityCheckRequest {
    pub slot_start: DateTime<Utc>,
    pub slot_end: DateTime<Utc>,
    #[serde(default)]
    pub booked: Vec<BookedInterval>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityCheckResponse {
    pub available: bool,
}
