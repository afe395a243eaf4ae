/// Prometheus metrics for the sales analytics service.
///
/// Covers HTTP and GraphQL traffic, sale mutations, analytics computation
/// time and sentiment requests. Everything is registered on a process-wide
/// registry and exported in text format on `/metrics`.
///
/// # Example
/// ```no_run
/// use sales_analytics::metrics::{HTTP_REQUESTS_TOTAL};
///
/// HTTP_REQUESTS_TOTAL
///     .with_label_values(&["GET", "/health", "200"])
///     .inc();
/// ```

mod middleware;

pub use middleware::{MetricsLayer, MetricsService};

use lazy_static::lazy_static;
use prometheus::{
    CounterVec, Gauge, Histogram, HistogramOpts, HistogramVec, Opts, Registry,
};

const NAMESPACE: &str = "sales_analytics";

lazy_static! {
    /// Global Prometheus registry for all metrics
    pub static ref PROMETHEUS_REGISTRY: Registry = Registry::new();

    // ============================================================================
    // HTTP Metrics
    // ============================================================================

    /// Total number of HTTP requests received
    ///
    /// Labels: method, path, status_code
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests")
            .namespace(NAMESPACE),
        &["method", "path", "status_code"]
    ).expect("Failed to create HTTP_REQUESTS_TOTAL metric");

    /// HTTP request duration in seconds
    ///
    /// Labels: method, path
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request duration in seconds"
        )
        .namespace(NAMESPACE)
        .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["method", "path"]
    ).expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric");

    /// Number of in-flight HTTP requests
    pub static ref HTTP_CONNECTIONS_ACTIVE: Gauge = Gauge::with_opts(
        Opts::new("http_connections_active", "Number of in-flight HTTP requests")
            .namespace(NAMESPACE)
    ).expect("Failed to create HTTP_CONNECTIONS_ACTIVE metric");

    // ============================================================================
    // GraphQL Metrics
    // ============================================================================

    /// Total number of GraphQL operations
    ///
    /// Labels: operation, status
    pub static ref GRAPHQL_QUERIES_TOTAL: CounterVec = CounterVec::new(
        Opts::new("graphql_queries_total", "Total number of GraphQL operations")
            .namespace(NAMESPACE),
        &["operation", "status"]
    ).expect("Failed to create GRAPHQL_QUERIES_TOTAL metric");

    /// GraphQL operation duration in seconds
    ///
    /// Labels: operation
    pub static ref GRAPHQL_QUERY_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "graphql_query_duration_seconds",
            "GraphQL operation duration in seconds"
        )
        .namespace(NAMESPACE)
        .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]),
        &["operation"]
    ).expect("Failed to create GRAPHQL_QUERY_DURATION metric");

    // ============================================================================
    // Domain Metrics
    // ============================================================================

    /// Sale mutations
    ///
    /// Labels: operation (create, delete), status (success, rejected, not_found, error)
    pub static ref SALE_MUTATIONS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("sale_mutations_total", "Total number of sale create/delete requests")
            .namespace(NAMESPACE),
        &["operation", "status"]
    ).expect("Failed to create SALE_MUTATIONS_TOTAL metric");

    /// Number of sales currently stored
    pub static ref SALES_STORED: Gauge = Gauge::with_opts(
        Opts::new("sales_stored", "Number of sales currently stored")
            .namespace(NAMESPACE)
    ).expect("Failed to create SALES_STORED metric");

    /// Time spent building an analytics report
    pub static ref ANALYTICS_COMPUTE_DURATION_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "analytics_compute_duration_seconds",
            "Time spent building an analytics report"
        )
        .namespace(NAMESPACE)
        .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0])
    ).expect("Failed to create ANALYTICS_COMPUTE_DURATION_SECONDS metric");

    /// Sentiment analyses performed
    ///
    /// Labels: sentiment (positive, neutral, negative)
    pub static ref SENTIMENT_ANALYSES_TOTAL: CounterVec = CounterVec::new(
        Opts::new("sentiment_analyses_total", "Total number of texts scored for sentiment")
            .namespace(NAMESPACE),
        &["sentiment"]
    ).expect("Failed to create SENTIMENT_ANALYSES_TOTAL metric");
}

/// Register every metric with the global registry.
///
/// Call once at startup. A second call fails with `AlreadyReg`.
pub fn init_metrics() -> Result<(), prometheus::Error> {
    PROMETHEUS_REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(HTTP_CONNECTIONS_ACTIVE.clone()))?;

    PROMETHEUS_REGISTRY.register(Box::new(GRAPHQL_QUERIES_TOTAL.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(GRAPHQL_QUERY_DURATION.clone()))?;

    PROMETHEUS_REGISTRY.register(Box::new(SALE_MUTATIONS_TOTAL.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(SALES_STORED.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(ANALYTICS_COMPUTE_DURATION_SECONDS.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(SENTIMENT_ANALYSES_TOTAL.clone()))?;

    tracing::info!("Prometheus metrics initialized successfully");
    Ok(())
}

/// Render the registry in the Prometheus text exposition format
pub fn gather_metrics() -> String {
    use prometheus::Encoder;
    let encoder = prometheus::TextEncoder::new();
    let metric_families = PROMETHEUS_REGISTRY.gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::from("# Error encoding metrics\n");
    }

    String::from_utf8(buffer).unwrap_or_else(|e| {
        tracing::error!("Failed to convert metrics to string: {}", e);
        String::from("# Error converting metrics\n")
    })
}
