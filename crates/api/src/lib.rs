//! # Slotwise API
//!
//! The API crate provides the web server for the Slotwise booking service.
//! It exposes slot generation and availability checks over HTTP, serves the
//! embed widget's configuration and relays the widget's messages.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate requests into calls on `slotwise-core`
//! - **Middleware**: Error mapping and rate limiting
//! - **Config**: Environment-driven settings

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for error handling and rate limiting
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{http::HeaderValue, Router};
use eyre::Result;
use slotwise_core::widget::{WidgetConfig, WidgetEventBus};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::{
    handlers::widget::LoggingListener,
    middleware::rate_limit::{rate_limit, RateLimiter},
};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Where the embed widget loads booking pages from
    pub widget: WidgetConfig,
    /// Listeners for messages posted by the booking page
    pub events: WidgetEventBus,
    /// Request history used by the rate limiting middleware
    pub rate_limiter: RateLimiter,
}

impl ApiState {
    /// Creates state with the logging listener already registered.
    pub fn new(widget: WidgetConfig, rate_limiter: RateLimiter) -> Self {
        let events = WidgetEventBus::new();
        events.register(Arc::new(LoggingListener));

        Self {
            widget,
            events,
            rate_limiter,
        }
    }

    pub fn from_config(config: &config::ApiConfig) -> Result<Self> {
        let widget = WidgetConfig::new(config.widget_base_url.as_str())
            .map_err(|e| eyre::eyre!("Invalid WIDGET_BASE_URL: {}", e))?;
        let rate_limiter = RateLimiter::new(
            config.rate_limit_max_requests,
            Duration::from_secs(config.rate_limit_window),
        )
        .with_trusted_forwarding(config.rate_limit_trust_forwarded);

        Ok(Self::new(widget, rate_limiter))
    }
}

/// Builds the router with every route and the rate limiter attached.
///
/// Health endpoints are mounted outside the rate limiter.
pub fn build_router(state: Arc<ApiState>) -> Router {
    let limited = Router::new()
        // Slot generation endpoints
        .merge(routes::slots::routes())
        // Availability check endpoints
        .merge(routes::availability::routes())
        // Embed widget endpoints
        .merge(routes::widget::routes())
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit,
        ));

    Router::new()
        .merge(routes::health::routes())
        .merge(limited)
        .with_state(state)
}

/// Starts the API server with the provided configuration
///
/// Initializes logging, builds the router, applies CORS, tracing and timeout
/// layers, and serves until the process is stopped.
pub async fn start_server(config: config::ApiConfig) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::from_config(&config)?);
    spawn_rate_limit_pruning(state.clone(), Duration::from_secs(config.rate_limit_window));

    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_origin(origins)
}

fn spawn_rate_limit_pruning(state: Arc<ApiState>, every: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            state.rate_limiter.prune();
        }
    });
}
