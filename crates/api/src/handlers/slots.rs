//! # Slot Handlers
//!
//! Endpoints that turn a resource's working hours into bookable slots.
//!
//! ```text
//! GET  /api/slots?start=09:00&end=17:00&duration=30&date=2024-06-01&timezone=America/Mexico_City
//! POST /api/slots/available
//! ```
//!
//! Every slot is returned with its UTC bounds and its start as read on a wall
//! clock in the requested timezone.

use axum::{extract::Query, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use slotwise_core::{
    errors::SlotResult,
    models::slot::{AvailableSlotsRequest, Slot, SlotResponse, SlotsResponse, WorkingHours},
    slots::{available_slots, generate_slots},
    timezone::format_in_zone,
};
use tracing::debug;

use crate::middleware::error_handling::AppError;

/// Pattern for `local_start`: ISO-8601 with the zone's UTC offset.
pub const LOCAL_TIME_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Query parameters for the slot listing endpoint
#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    /// Start of the working window, `HH:mm`
    pub start: String,
    /// End of the working window, `HH:mm`
    pub end: String,
    /// Slot length in minutes
    pub duration: i64,
    /// Calendar date, `YYYY-MM-DD`
    pub date: NaiveDate,
    /// IANA timezone the window is expressed in
    pub timezone: String,
}

/// Lists every slot of the working window.
///
/// # Errors
///
/// * `SlotError::InvalidTimeFormat` - `start` or `end` is not `HH:mm`
/// * `SlotError::InvalidTimezone` - unknown timezone
/// * `SlotError::InvalidDuration` - `duration` is not positive
pub async fn list_slots(Query(query): Query<SlotsQuery>) -> Result<Json<SlotsResponse>, AppError> {
    let starts = generate_slots(
        &query.start,
        &query.end,
        query.duration,
        query.date,
        &query.timezone,
    )?;
    debug!(
        date = %query.date,
        timezone = %query.timezone,
        count = starts.len(),
        "Generated slots"
    );

    let slots = starts
        .into_iter()
        .map(|start| slot_response(&Slot::new(start, query.duration), &query.timezone))
        .collect::<SlotResult<Vec<_>>>()?;

    Ok(Json(SlotsResponse {
        date: query.date,
        timezone: query.timezone,
        duration: query.duration,
        slots,
    }))
}

/// Lists the slots of the working window that none of the supplied bookings
/// touch.
pub async fn list_available_slots(
    Json(request): Json<AvailableSlotsRequest>,
) -> Result<Json<SlotsResponse>, AppError> {
    let hours = WorkingHours::new(request.start, request.end);
    let free = available_slots(
        &hours,
        request.duration,
        request.date,
        &request.timezone,
        &request.booked,
    )?;
    debug!(
        date = %request.date,
        booked = request.booked.len(),
        free = free.len(),
        "Filtered available slots"
    );

    let slots = free
        .iter()
        .map(|slot| slot_response(slot, &request.timezone))
        .collect::<SlotResult<Vec<_>>>()?;

    Ok(Json(SlotsResponse {
        date: request.date,
        timezone: request.timezone,
        duration: request.duration,
        slots,
    }))
}

fn slot_response(slot: &Slot, timezone: &str) -> SlotResult<SlotResponse> {
    Ok(SlotResponse {
        start: slot.start,
        end: slot.end(),
        local_start: format_in_zone(slot.start, timezone, LOCAL_TIME_PATTERN)?,
    })
}
