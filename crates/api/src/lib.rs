//! # EventCal API
//!
//! The API crate provides the web server for the EventCal personal calendar.
//! It serves the calendar views, the event pages and the reminder pages.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Error mapping, flash messages and async request detection
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework. Persistence goes through the
//! [`EventStore`] trait from `eventcal-db`.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Cross-cutting request concerns
pub mod middleware;
/// Route definitions and endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
};
use eventcal_core::clock::Clock;
use eventcal_db::store::EventStore;
use eyre::Result;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::middleware::{flash::FlashMessages, xhr::REQUESTED_WITH_HEADER};

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use eventcal_api::{ApiState, build_router};
/// use eventcal_core::clock::SystemClock;
/// use eventcal_db::store::InMemoryStore;
///
/// let state = ApiState::new(Arc::new(InMemoryStore::new()), Arc::new(SystemClock));
/// let app = build_router(Arc::new(state));
/// # drop(app);
/// ```
pub struct ApiState {
    /// Event and reminder persistence
    pub store: Arc<dyn EventStore>,
    /// Source of "now" and "today"
    pub clock: Arc<dyn Clock>,
    /// Messages waiting for the next rendered page
    pub flash: FlashMessages,
}

impl ApiState {
    pub fn new(store: Arc<dyn EventStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            flash: FlashMessages::new(),
        }
    }
}

/// Builds the application router with every route attached to `state`.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Calendar list
        .merge(routes::calendar::routes())
        // Event pages and attendance
        .merge(routes::event::routes())
        // Reminder pages
        .merge(routes::reminder::routes())
        // Health check endpoints
        .merge(routes::health::routes())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
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
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(REQUESTED_WITH_HEADER),
        ])
        .allow_origin(allowed)
        .allow_credentials(true)
}

/// Starts the server with the provided configuration and state
///
/// Sets up logging, attaches the request layers and serves until the
/// listener fails.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use eventcal_api::{ApiState, config::ApiConfig, start_server};
/// use eventcal_core::clock::SystemClock;
/// use eventcal_db::{create_pool, store::PgStore};
///
/// # async fn run() -> eyre::Result<()> {
/// let config = ApiConfig::from_env()?;
/// let pool = create_pool(&config.database_url, config.database_max_connections).await?;
/// let state = ApiState::new(Arc::new(PgStore::new(pool)), Arc::new(SystemClock));
/// start_server(config, Arc::new(state)).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, state: Arc<ApiState>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    // Request logging and timeout
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
