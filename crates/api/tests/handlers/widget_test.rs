use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use slotwise_core::{
    models::widget::{DispatchResponse, EmbedResponse},
    widget::EmbedMode,
};

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_embed_url_defaults_to_popup() {
    let ctx = TestContext::new();

    let response = ctx
        .get_with_query("/api/widget/embed", &[("resource", "team-sync")])
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: EmbedResponse = response.json();
    assert_eq!(body.mode, EmbedMode::Popup);
    assert_eq!(body.src, "https://book.example.com/team-sync?embed=popup");
}

#[tokio::test]
async fn test_embed_url_with_mode() {
    let ctx = TestContext::new();

    let response = ctx
        .get_with_query(
            "/api/widget/embed",
            &[("resource", "team-sync"), ("mode", "badge")],
        )
        .await;
    let body: EmbedResponse = response.json();

    assert_eq!(body.mode, EmbedMode::Badge);
    assert_eq!(body.src, "https://book.example.com/team-sync?embed=badge");
}

#[tokio::test]
async fn test_embed_url_rejects_unknown_mode() {
    let ctx = TestContext::new();

    let response = ctx
        .get_with_query(
            "/api/widget/embed",
            &[("resource", "team-sync"), ("mode", "fullscreen")],
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_close_message_reaches_listeners() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/widget/messages")
        .json(&json!({ "type": "close" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: DispatchResponse = response.json();
    assert_eq!(body.event, "slotwise:close");
    assert_eq!(body.delivered, ctx.state.events.listener_count());
    assert_eq!(body.delivered, 1);
}

#[tokio::test]
async fn test_booking_completed_message() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/widget/messages")
        .json(&json!({
            "type": "booking-completed",
            "booking": {
                "id": uuid::Uuid::new_v4(),
                "startTime": "2024-06-01T15:00:00Z",
                "endTime": "2024-06-01T15:30:00Z",
                "timezone": "America/Mexico_City",
                "email": "ada@example.com"
            }
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<DispatchResponse>().event,
        "slotwise:booking-completed"
    );
}

#[tokio::test]
async fn test_unknown_message_is_rejected() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/widget/messages")
        .json(&json!({ "type": "resize", "height": 400 }))
        .await;
    assert!(response.status_code().is_client_error());
}
