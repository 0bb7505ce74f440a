//! Server-side half of the embeddable booking widget: how its iframe URL is
//! built and how its messages reach the rest of the system.

pub mod config;
pub mod events;

pub use config::{EmbedMode, WidgetConfig};
pub use events::{WidgetEventBus, WidgetListener, WidgetMessage};
