use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid time format: {0} (expected HH:mm)")]
    InvalidTimeFormat(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid duration: {0} minutes (must be positive)")]
    InvalidDuration(i64),

    #[error("Invalid format pattern: {0}")]
    InvalidFormatPattern(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Internal server error: {0}")]
    Internal(#[from] eyre::Report),
}

impl SlotError {
    /// True for errors caused by malformed caller input.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SlotError::InvalidTimeFormat(_)
                | SlotError::InvalidTimezone(_)
                | SlotError::InvalidDuration(_)
                | SlotError::InvalidFormatPattern(_)
                | SlotError::Validation(_)
        )
    }
}

pub type SlotResult<T> = Result<T, SlotError>;
