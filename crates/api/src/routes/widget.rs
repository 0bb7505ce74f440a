use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/widget/embed", get(handlers::widget::embed_url))
        .route("/api/widget/messages", post(handlers::widget::post_message))
}
