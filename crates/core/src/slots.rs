//! # Slot Generation
//!
//! Enumerates the bookable slots of a working-hours window on one calendar
//! date. Both window bounds are resolved to instants first, then the window is
//! walked in absolute time, so every slot is exactly `duration` long even on
//! days with a daylight saving transition.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::{
    availability::is_available,
    errors::{SlotError, SlotResult},
    models::slot::{BookedInterval, Slot, WorkingHours},
    timezone::parse_local_time,
};

/// Returns the start instant of every slot in `[start_time, end_time)`.
///
/// The first slot starts at `start_time`; each following slot starts where the
/// previous one ends. A slot is kept only when it finishes at or before
/// `end_time`. A window whose start is not before its end yields no slots.
///
/// # Errors
///
/// * `SlotError::InvalidDuration` - `duration_minutes` is zero or negative
/// * `SlotError::InvalidTimeFormat` - a bound is not `HH:mm`
/// * `SlotError::InvalidTimezone` - unknown timezone identifier
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use slotwise_core::slots::generate_slots;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let slots = generate_slots("09:00", "10:00", 45, date, "UTC").unwrap();
/// assert_eq!(slots.len(), 1);
/// ```
pub fn generate_slots(
    start_time: &str,
    end_time: &str,
    duration_minutes: i64,
    date: NaiveDate,
    timezone: &str,
) -> SlotResult<Vec<DateTime<Utc>>> {
    if duration_minutes <= 0 {
        return Err(SlotError::InvalidDuration(duration_minutes));
    }

    let window_start = parse_local_time(start_time, date, timezone)?;
    let window_end = parse_local_time(end_time, date, timezone)?;

    // A step too large for chrono to represent cannot fit in any window.
    let Some(step) = Duration::try_minutes(duration_minutes) else {
        return Ok(Vec::new());
    };

    let mut slots = Vec::new();
    let mut cursor = window_start;
    while let Some(slot_end) = cursor.checked_add_signed(step) {
        if slot_end > window_end {
            break;
        }
        slots.push(cursor);
        cursor = slot_end;
    }

    Ok(slots)
}

/// Generates the slots of `hours` on `date` and keeps those that conflict
/// with none of `booked`.
pub fn available_slots(
    hours: &WorkingHours,
    duration_minutes: i64,
    date: NaiveDate,
    timezone: &str,
    booked: &[BookedInterval],
) -> SlotResult<Vec<Slot>> {
    let starts = generate_slots(&hours.start, &hours.end, duration_minutes, date, timezone)?;

    Ok(starts
        .into_iter()
        .map(|start| Slot::new(start, duration_minutes))
        .filter(|slot| is_available(slot.start, slot.end(), booked))
        .collect())
}
