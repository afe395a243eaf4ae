use crate::api::openapi::docs_routes;
use crate::api::rate_limit::{rate_limit, ClientRateLimiter};
use crate::api::{handlers, AppState};
use crate::config::{Config, RateLimitConfig};
use crate::graphql::graphql_routes;
use crate::metrics::MetricsLayer;
use axum::{
    http::{HeaderName, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Response headers added to every reply.
///
/// Content-Security-Policy and Cross-Origin-Embedder-Policy are left out so
/// the GraphQL playground and Swagger UI keep loading their assets.
pub const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-origin"),
    ("origin-agent-cluster", "?1"),
    ("referrer-policy", "no-referrer"),
    ("strict-transport-security", "max-age=15552000; includeSubDomains"),
    ("x-content-type-options", "nosniff"),
    ("x-dns-prefetch-control", "off"),
    ("x-download-options", "noopen"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-permitted-cross-domain-policies", "none"),
    ("x-xss-protection", "0"),
];

/// Build the main API router: REST endpoints, GraphQL, docs and metrics
pub fn build_router(state: AppState, config: &Config) -> Router {
    let mut router = Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        // Sales
        .route(
            "/v1/sales",
            get(handlers::list_sales).post(handlers::create_sale),
        )
        .route(
            "/v1/sales/:id",
            get(handlers::get_sale).delete(handlers::delete_sale),
        )
        // Dashboard
        .route("/v1/analytics", get(handlers::get_analytics))
        // Sentiment
        .route("/v1/sentiment", post(handlers::analyze_sentiment))
        .route("/v1/sentiment/batch", post(handlers::analyze_sentiment_batch))
        .with_state(state.clone())
        .merge(throttled(graphql_routes(state.service), &config.rate_limit))
        .merge(docs_routes());

    if config.observability.prometheus_enabled {
        router = router
            .route("/metrics", get(handlers::metrics))
            .layer(MetricsLayer::new());
    }

    let router = router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config.server.cors_origin));

    with_security_headers(router)
}

/// Apply the per-client rate limit to `routes` when enabled
fn throttled(routes: Router, config: &RateLimitConfig) -> Router {
    if !config.enabled {
        return routes;
    }

    match ClientRateLimiter::new(config) {
        Ok(limiter) => {
            tracing::info!(
                max_requests = config.max_requests,
                window_secs = config.window_secs,
                "GraphQL rate limiting enabled"
            );
            routes.layer(middleware::from_fn_with_state(limiter, rate_limit))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Invalid rate limit configuration, GraphQL is not throttled");
            routes
        }
    }
}

fn with_security_headers(router: Router) -> Router {
    SECURITY_HEADERS.iter().fold(router, |router, &(name, value)| {
        router.layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ))
    })
}

/// CORS for the dashboard origin. `*` allows any origin.
fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    if origin == "*" {
        return layer.allow_origin(Any);
    }

    match origin.parse::<HeaderValue>() {
        Ok(value) => layer.allow_origin(value),
        Err(e) => {
            tracing::warn!(origin, error = %e, "Invalid CORS origin, cross-origin requests disabled");
            layer
        }
    }
}
