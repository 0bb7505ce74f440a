use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::{SlotError, SlotResult};

/// How the booking page is presented on the host site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedMode {
    #[default]
    Popup,
    Inline,
    Badge,
}

impl EmbedMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbedMode::Popup => "popup",
            EmbedMode::Inline => "inline",
            EmbedMode::Badge => "badge",
        }
    }
}

impl fmt::Display for EmbedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmbedMode {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "popup" => Ok(EmbedMode::Popup),
            "inline" => Ok(EmbedMode::Inline),
            "badge" => Ok(EmbedMode::Badge),
            other => Err(SlotError::Validation(format!(
                "Unknown embed mode '{}', expected popup, inline or badge",
                other
            ))),
        }
    }
}

/// Settings the embed widget is built from.
///
/// The base URL is always passed in by the caller; there is no fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    base_url: String,
    default_mode: EmbedMode,
}

impl WidgetConfig {
    /// Creates a config for the booking site at `base_url`.
    ///
    /// # Errors
    ///
    /// * `SlotError::Validation` - the URL is empty or not `http(s)://`
    pub fn new(base_url: impl Into<String>) -> SlotResult<Self> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');

        let host = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"));
        match host {
            Some(host) if !host.is_empty() => Ok(Self {
                base_url: trimmed.to_string(),
                default_mode: EmbedMode::default(),
            }),
            _ => Err(SlotError::Validation(format!(
                "Widget base URL must be an http(s) URL, got '{}'",
                base_url
            ))),
        }
    }

    pub fn with_default_mode(mut self, mode: EmbedMode) -> Self {
        self.default_mode = mode;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_mode(&self) -> EmbedMode {
        self.default_mode
    }

    /// Builds the iframe `src` for the booking page of `resource`.
    ///
    /// Falls back to the configured default mode when `mode` is `None`.
    pub fn embed_url(&self, resource: &str, mode: Option<EmbedMode>) -> SlotResult<String> {
        let resource = resource.trim().trim_matches('/');
        if resource.is_empty() {
            return Err(SlotError::Validation(
                "Resource identifier must not be empty".to_string(),
            ));
        }

        let mode = mode.unwrap_or(self.default_mode);
        Ok(format!(
            "{}/{}?embed={}",
            self.base_url,
            urlencoding::encode(resource),
            mode
        ))
    }
}
