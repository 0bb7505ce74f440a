use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use pretty_assertions::assert_eq;
use rstest::rstest;
use axum_test::TestRequest;
use slotwise_api::{
    middleware::{error_handling::map_error, rate_limit::RateLimiter},
    routes::health::HealthResponse,
};
use slotwise_core::errors::SlotError;

use crate::test_utils::TestContext;

fn slots(ctx: &TestContext) -> TestRequest {
    ctx.get_with_query(
        "/api/slots",
        &[
            ("start", "09:00"),
            ("end", "10:00"),
            ("duration", "30"),
            ("date", "2024-06-01"),
            ("timezone", "UTC"),
        ],
    )
}

#[rstest]
#[case(SlotError::InvalidTimeFormat("'9'".into()), StatusCode::BAD_REQUEST)]
#[case(SlotError::InvalidTimezone("'X'".into()), StatusCode::BAD_REQUEST)]
#[case(SlotError::InvalidDuration(0), StatusCode::BAD_REQUEST)]
#[case(SlotError::InvalidFormatPattern("'%Q'".into()), StatusCode::BAD_REQUEST)]
#[case(SlotError::Validation("bad".into()), StatusCode::BAD_REQUEST)]
#[case(SlotError::RateLimited { retry_after_secs: 5 }, StatusCode::TOO_MANY_REQUESTS)]
#[case(SlotError::Internal(eyre::eyre!("boom")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: SlotError, #[case] expected: StatusCode) {
    assert_eq!(map_error(error).status(), expected);
}

#[test]
fn test_rate_limited_response_sets_retry_after() {
    let response = map_error(SlotError::RateLimited { retry_after_secs: 42 });
    assert_eq!(
        response.headers().get("retry-after").unwrap(),
        &HeaderValue::from_static("42")
    );
}

#[tokio::test]
async fn test_rate_limit_blocks_after_allowance() {
    let ctx = TestContext::with_rate_limit(2, Duration::from_secs(60));

    assert_eq!(slots(&ctx).await.status_code(), StatusCode::OK);
    assert_eq!(slots(&ctx).await.status_code(), StatusCode::OK);

    let blocked = slots(&ctx).await;
    assert_eq!(blocked.status_code(), StatusCode::TOO_MANY_REQUESTS);
    let retry_after: u64 = blocked
        .header("retry-after")
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!((1..=60).contains(&retry_after));
}

#[tokio::test]
async fn test_rate_limit_is_per_forwarded_client_when_trusted() {
    let ctx = TestContext::with_limiter(
        RateLimiter::new(1, Duration::from_secs(60)).with_trusted_forwarding(true),
    );
    let forwarded = HeaderName::from_static("x-forwarded-for");

    let first = slots(&ctx)
        .add_header(forwarded.clone(), HeaderValue::from_static("203.0.113.7"))
        .await;
    let second = slots(&ctx)
        .add_header(forwarded.clone(), HeaderValue::from_static("198.51.100.4, 10.0.0.1"))
        .await;
    let repeat = slots(&ctx)
        .add_header(forwarded, HeaderValue::from_static("203.0.113.7"))
        .await;

    assert_eq!(first.status_code(), StatusCode::OK);
    assert_eq!(second.status_code(), StatusCode::OK);
    assert_eq!(repeat.status_code(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(ctx.state.rate_limiter.tracked_clients(), 2);
}

#[tokio::test]
async fn test_forwarded_header_is_ignored_by_default() {
    let ctx = TestContext::with_rate_limit(1, Duration::from_secs(60));
    let forwarded = HeaderName::from_static("x-forwarded-for");

    let first = slots(&ctx)
        .add_header(forwarded.clone(), HeaderValue::from_static("203.0.113.7"))
        .await;
    let spoofed = slots(&ctx)
        .add_header(forwarded, HeaderValue::from_static("198.51.100.4"))
        .await;

    assert_eq!(first.status_code(), StatusCode::OK);
    assert_eq!(spoofed.status_code(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(ctx.state.rate_limiter.tracked_clients(), 1);
}

#[tokio::test]
async fn test_health_is_not_rate_limited() {
    let ctx = TestContext::with_rate_limit(1, Duration::from_secs(60));

    for _ in 0..3 {
        let response = ctx.server.get("/health").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "ok");
        assert_eq!(body.widget_listeners, 1);
    }
}
