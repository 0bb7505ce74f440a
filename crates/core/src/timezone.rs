//! # Timezone Conversion
//!
//! Helpers for moving between absolute instants (UTC) and wall-clock times in
//! an IANA timezone. Offsets are always looked up from the zone rules at the
//! moment being converted, so daylight saving transitions are honoured.
//!
//! ## Daylight saving resolution
//!
//! Local times that do not map to exactly one instant are resolved
//! deterministically, never rejected:
//!
//! - **Fall-back overlap** (the local time occurs twice): the earlier instant
//!   wins, i.e. the offset in effect before the transition.
//! - **Spring-forward gap** (the local time never occurs): the time is read
//!   with the offset in effect before the gap, which moves it forward by the
//!   length of the gap. `02:30` on a US spring-forward day becomes `03:30`
//!   daylight time.

use chrono::{
    format::{Item, StrftimeItems},
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;

use crate::errors::{SlotError, SlotResult};

/// Resolves an IANA timezone identifier such as `America/Mexico_City`.
pub fn parse_timezone(timezone: &str) -> SlotResult<Tz> {
    timezone
        .parse::<Tz>()
        .map_err(|_| SlotError::InvalidTimezone(format!("'{}'", timezone)))
}

/// Interprets `local` as wall-clock time in `timezone` and returns the
/// equivalent instant.
pub fn to_utc(local: NaiveDateTime, timezone: &str) -> SlotResult<DateTime<Utc>> {
    let tz = parse_timezone(timezone)?;
    Ok(resolve_local(&tz, local))
}

/// Returns the wall-clock reading of `instant` as observed in `timezone`.
pub fn from_utc(instant: DateTime<Utc>, timezone: &str) -> SlotResult<NaiveDateTime> {
    let tz = parse_timezone(timezone)?;
    Ok(instant.with_timezone(&tz).naive_local())
}

/// Renders `instant` in `timezone` using a strftime-style `pattern`.
///
/// # Errors
///
/// * `SlotError::InvalidTimezone` - unknown timezone identifier
/// * `SlotError::InvalidFormatPattern` - the pattern contains an unknown specifier
pub fn format_in_zone(instant: DateTime<Utc>, timezone: &str, pattern: &str) -> SlotResult<String> {
    let tz = parse_timezone(timezone)?;
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(SlotError::InvalidFormatPattern(format!("'{}'", pattern)));
    }

    Ok(instant
        .with_timezone(&tz)
        .format_with_items(items.iter())
        .to_string())
}

/// Combines `date` with an `HH:mm` time of day, reads the result as wall-clock
/// time in `timezone` and returns the absolute instant.
///
/// # Errors
///
/// * `SlotError::InvalidTimeFormat` - `time_of_day` is not a two-digit `HH:mm` value
/// * `SlotError::InvalidTimezone` - unknown timezone identifier
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use slotwise_core::timezone::parse_local_time;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let instant = parse_local_time("09:00", date, "America/Mexico_City").unwrap();
/// assert_eq!(instant.to_rfc3339(), "2024-01-15T15:00:00+00:00");
/// ```
pub fn parse_local_time(
    time_of_day: &str,
    date: NaiveDate,
    timezone: &str,
) -> SlotResult<DateTime<Utc>> {
    let time = parse_time_of_day(time_of_day)?;
    to_utc(date.and_time(time), timezone)
}

/// Parses a strict `HH:mm` string (24-hour clock, zero padded).
pub fn parse_time_of_day(time_of_day: &str) -> SlotResult<NaiveTime> {
    let invalid = || SlotError::InvalidTimeFormat(format!("'{}'", time_of_day));

    let bytes = time_of_day.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[2] == b':'
        && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
    if !well_formed {
        return Err(invalid());
    }

    NaiveTime::parse_from_str(time_of_day, "%H:%M").map_err(|_| invalid())
}

fn resolve_local(tz: &Tz, local: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            // Transitions are never less than a day apart, so the offset a day
            // earlier is the one in force right before the gap.
            let before = tz
                .offset_from_utc_datetime(&(local - Duration::days(1)))
                .fix()
                .local_minus_utc();
            Utc.from_utc_datetime(&(local - Duration::seconds(i64::from(before))))
        }
    }
}
