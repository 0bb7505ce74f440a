use serde::{Deserialize, Serialize};

use crate::widget::EmbedMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedResponse {
    pub src: String,
    pub mode: EmbedMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchResponse {
    pub event: String,
    pub delivered: usize,
}
