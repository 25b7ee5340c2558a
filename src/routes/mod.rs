pub mod health;
pub mod network;

use axum::routing::get;
use axum::Router;
use std::time::Duration;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;

use crate::metrics;
use crate::services::AppState;

/// Maximum concurrent requests (backpressure control)
const MAX_CONCURRENT_REQUESTS: usize = 100;

/// Request timeout in seconds; layout and render block the worker until done,
/// so runaway requests get cut here.
const REQUEST_TIMEOUT_SECS: u64 = 60;

pub fn create_router(state: AppState) -> Router {
    let (prometheus_layer, metrics_router) = metrics::setup_metrics();

    let app_routes = Router::new()
        .route("/", get(network::index))
        .route("/network", get(network::network_page))
        .route("/api/network", get(network::network_json))
        .with_state(state);

    let health_routes = Router::new().route("/health", get(health::health_check));

    Router::new()
        .merge(app_routes)
        .merge(health_routes)
        .merge(metrics_router)
        .layer(
            ServiceBuilder::new()
                // Prometheus metrics (outermost - captures all requests)
                .layer(prometheus_layer)
                // Request timeout
                .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
                // Concurrency limit for backpressure
                .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS)),
        )
}
