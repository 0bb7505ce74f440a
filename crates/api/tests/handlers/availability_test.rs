use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use slotwise_core::models::slot::AvailabilityCheckResponse;

use crate::test_utils::TestContext;

#[rstest]
#[case::partial_overlap("2024-06-01T15:15:00Z", "2024-06-01T15:45:00Z", false)]
#[case::identical("2024-06-01T15:00:00Z", "2024-06-01T15:30:00Z", false)]
#[case::abuts_end("2024-06-01T15:30:00Z", "2024-06-01T16:00:00Z", true)]
#[case::abuts_start("2024-06-01T14:30:00Z", "2024-06-01T15:00:00Z", true)]
#[tokio::test]
async fn test_check_availability(
    #[case] slot_start: &str,
    #[case] slot_end: &str,
    #[case] expected: bool,
) {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/availability/check")
        .json(&json!({
            "slot_start": slot_start,
            "slot_end": slot_end,
            "booked": [
                { "startTime": "2024-06-01T15:00:00Z", "endTime": "2024-06-01T15:30:00Z" }
            ]
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<AvailabilityCheckResponse>().available, expected);
}

#[tokio::test]
async fn test_check_availability_without_bookings() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/availability/check")
        .json(&json!({
            "slot_start": "2024-06-01T15:00:00Z",
            "slot_end": "2024-06-01T15:30:00Z"
        }))
        .await;

    assert!(response.json::<AvailabilityCheckResponse>().available);
}

#[tokio::test]
async fn test_check_availability_rejects_inverted_interval() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/availability/check")
        .json(&json!({
            "slot_start": "2024-06-01T16:00:00Z",
            "slot_end": "2024-06-01T15:00:00Z",
            "booked": []
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
