//! # Availability Check
//!
//! Decides whether a candidate interval collides with existing bookings.
//!
//! Intervals are half-open, `[start, end)`: a candidate that ends exactly when
//! a booking begins (or begins exactly when one ends) does not conflict.

use chrono::{DateTime, Utc};

use crate::models::slot::BookedInterval;

/// Returns `true` when `[slot_start, slot_end)` overlaps none of `booked`.
///
/// Two intervals conflict when `slot_start < booked.end_time` and
/// `slot_end > booked.start_time`, or when both start at the same instant.
/// The second test only matters for zero-length intervals, which the first
/// one cannot see.
///
/// Stops at the first conflict. `booked` is neither filtered nor reordered,
/// so callers pass only the bookings relevant to the resource and date.
///
/// # Example
///
/// ```
/// use chrono::{DateTime, Utc};
/// use slotwise_core::{availability::is_available, models::slot::BookedInterval};
///
/// let at = |s: &str| s.parse::<DateTime<Utc>>().unwrap();
/// let booked = [BookedInterval::new(at("2024-06-01T15:00:00Z"), at("2024-06-01T15:30:00Z"))];
///
/// assert!(!is_available(at("2024-06-01T15:15:00Z"), at("2024-06-01T15:45:00Z"), &booked));
/// assert!(is_available(at("2024-06-01T15:30:00Z"), at("2024-06-01T16:00:00Z"), &booked));
/// ```
pub fn is_available(
    slot_start: DateTime<Utc>,
    slot_end: DateTime<Utc>,
    booked: &[BookedInterval],
) -> bool {
    !booked
        .iter()
        .any(|interval| conflicts(slot_start, slot_end, interval))
}

fn conflicts(slot_start: DateTime<Utc>, slot_end: DateTime<Utc>, booked: &BookedInterval) -> bool {
    let overlaps = slot_start < booked.end_time && slot_end > booked.start_time;
    overlaps || slot_start == booked.start_time
}
