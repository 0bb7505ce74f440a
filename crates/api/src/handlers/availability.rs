use axum::Json;
use slotwise_core::{
    availability::is_available,
    errors::SlotError,
    models::slot::{AvailabilityCheckRequest, AvailabilityCheckResponse},
};

use crate::middleware::error_handling::AppError;

/// Checks one candidate interval against a snapshot of bookings.
///
/// ```text
/// POST /api/availability/check
/// { "slot_start": "...", "slot_end": "...", "booked": [{ "startTime": "...", "endTime": "..." }] }
/// ```
///
/// The answer only holds for the bookings sent along; reserving the slot is
/// up to the booking store.
pub async fn check_availability(
    Json(request): Json<AvailabilityCheckRequest>,
) -> Result<Json<AvailabilityCheckResponse>, AppError> {
    if request.slot_end < request.slot_start {
        return Err(AppError(SlotError::Validation(
            "slot_end must not be before slot_start".to_string(),
        )));
    }

    let available = is_available(request.slot_start, request.slot_end, &request.booked);
    Ok(Json(AvailabilityCheckResponse { available }))
}
