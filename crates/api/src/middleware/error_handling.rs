//! # Error Handling Middleware
//!
//! This module maps Slotwise domain errors to HTTP status codes and JSON
//! error responses, so every endpoint reports failures the same way.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use slotwise_core::errors::SlotError;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps a `SlotError` and implements `IntoResponse`, turning it
/// into a status code and a `{ "error": message }` body.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use chrono::NaiveDate;
/// use slotwise_api::middleware::error_handling::AppError;
/// use slotwise_core::slots::generate_slots;
///
/// async fn handler(date: NaiveDate) -> Result<Json<usize>, AppError> {
///     let slots = generate_slots("09:00", "17:00", 30, date, "UTC")?;
///     Ok(Json(slots.len()))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub SlotError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SlotError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            SlotError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            err if err.is_input_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {:?}", self.0);
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        let mut response = (status, body).into_response();

        if let SlotError::RateLimited { retry_after_secs } = self.0 {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
        }

        response
    }
}

/// Allows `?` on `SlotResult` values inside handlers.
impl From<SlotError> for AppError {
    fn from(err: SlotError) -> Self {
        AppError(err)
    }
}

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(SlotError::Internal(err))
    }
}

/// Maps a SlotError straight to an HTTP response
pub fn map_error(err: SlotError) -> Response {
    AppError(err).into_response()
}
