//! # Widget Handlers
//!
//! The embed script asks the API where its iframe should point, and relays
//! the messages the booking page posts back so the server can react to them.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use slotwise_core::{
    models::widget::{DispatchResponse, EmbedResponse},
    widget::{EmbedMode, WidgetListener, WidgetMessage},
};
use std::sync::Arc;
use tracing::info;

use crate::{middleware::error_handling::AppError, ApiState};

#[derive(Debug, Deserialize)]
pub struct EmbedQuery {
    /// Booking page identifier, e.g. a user or event slug
    pub resource: String,
    /// `popup`, `inline` or `badge`; the configured default when absent
    pub mode: Option<String>,
}

/// Returns the iframe `src` for a booking page.
pub async fn embed_url(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<EmbedQuery>,
) -> Result<Json<EmbedResponse>, AppError> {
    let mode = match query.mode.as_deref() {
        Some(raw) => raw.parse::<EmbedMode>()?,
        None => state.widget.default_mode(),
    };
    let src = state.widget.embed_url(&query.resource, Some(mode))?;

    Ok(Json(EmbedResponse { src, mode }))
}

/// Hands a message from the booking page to every registered listener.
pub async fn post_message(
    State(state): State<Arc<ApiState>>,
    Json(message): Json<WidgetMessage>,
) -> Json<DispatchResponse> {
    let delivered = state.events.dispatch(&message);

    Json(DispatchResponse {
        event: message.event_name().to_string(),
        delivered,
    })
}

/// Writes every widget message to the log.
pub struct LoggingListener;

impl WidgetListener for LoggingListener {
    fn on_message(&self, message: &WidgetMessage) {
        match message {
            WidgetMessage::CloseRequested => info!("Widget closed by booking page"),
            WidgetMessage::BookingCompleted { booking } => info!(
                booking_id = %booking.id,
                start = %booking.start_time,
                end = %booking.end_time,
                timezone = %booking.timezone,
                "Booking completed"
            ),
        }
    }
}
