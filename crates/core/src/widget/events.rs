//! Typed channel between the embedded booking page and its host.
//!
//! The booking page emits two kinds of message: a request to close the
//! widget, and a notification that a booking went through. Any transport
//! (browser messaging, an HTTP relay, a socket) can feed them into a
//! [`WidgetEventBus`], which hands each one to every registered listener.

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::booking::BookingPayload;

/// A message sent by the booking page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum WidgetMessage {
    #[serde(rename = "close")]
    CloseRequested,
    BookingCompleted { booking: BookingPayload },
}

impl WidgetMessage {
    /// Name of the custom event the host page dispatches for this message.
    pub fn event_name(&self) -> &'static str {
        match self {
            WidgetMessage::CloseRequested => "slotwise:close",
            WidgetMessage::BookingCompleted { .. } => "slotwise:booking-completed",
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait WidgetListener: Send + Sync {
    fn on_message(&self, message: &WidgetMessage);
}

/// Fan-out of widget messages to registered listeners.
#[derive(Default)]
pub struct WidgetEventBus {
    listeners: RwLock<Vec<Arc<dyn WidgetListener>>>,
}

impl WidgetEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, listener: Arc<dyn WidgetListener>) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Delivers `message` to every listener in registration order and
    /// returns how many were notified.
    pub fn dispatch(&self, message: &WidgetMessage) -> usize {
        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        debug!(
            event = message.event_name(),
            listeners = listeners.len(),
            "Dispatching widget message"
        );
        for listener in &listeners {
            listener.on_message(message);
        }
        listeners.len()
    }
}
