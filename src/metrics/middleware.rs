/// HTTP middleware recording request count, duration and in-flight requests.
///
/// Paths are labelled with the matched route template (`/v1/sales/:id`) so
/// ids don't blow up label cardinality.

use super::*;
use axum::{
    extract::{MatchedPath, Request},
    response::Response,
};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;
use tower::{Layer, Service};

/// Paths never recorded
const EXCLUDED_PATHS: &[&str] = &["/metrics"];

/// Tower layer for metrics middleware
#[derive(Clone)]
pub struct MetricsLayer {
    excluded: Arc<Vec<String>>,
}

impl MetricsLayer {
    pub fn new() -> Self {
        Self {
            excluded: Arc::new(EXCLUDED_PATHS.iter().map(|p| p.to_string()).collect()),
        }
    }
}

impl Default for MetricsLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsService {
            inner,
            excluded: self.excluded.clone(),
        }
    }
}

/// Tower service for metrics collection
#[derive(Clone)]
pub struct MetricsService<S> {
    inner: S,
    excluded: Arc<Vec<String>>,
}

impl<S> Service<Request> for MetricsService<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let method = req.method().to_string();
        let path = req
            .extensions()
            .get::<MatchedPath>()
            .map(|p| p.as_str().to_string())
            .unwrap_or_else(|| req.uri().path().to_string());

        if self.excluded.iter().any(|p| p == &path) {
            return Box::pin(self.inner.call(req));
        }

        HTTP_CONNECTIONS_ACTIVE.inc();

        let start = Instant::now();
        let future = self.inner.call(req);

        Box::pin(async move {
            let result = future.await;

            // Always decrement, even when the inner service fails
            HTTP_CONNECTIONS_ACTIVE.dec();

            if let Ok(response) = &result {
                let status = response.status().as_u16().to_string();

                HTTP_REQUESTS_TOTAL
                    .with_label_values(&[&method, &path, &status])
                    .inc();
                HTTP_REQUEST_DURATION_SECONDS
                    .with_label_values(&[&method, &path])
                    .observe(start.elapsed().as_secs_f64());
            }

            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, routing::get, Router};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_records_matched_path() {
        let app = Router::new()
            .route("/items/:id", get(|| async { "ok" }))
            .layer(MetricsLayer::new());

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/items/42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let count = HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/items/:id", "200"])
            .get();
        assert!(count >= 1.0);
    }

    #[tokio::test]
    async fn test_metrics_path_excluded() {
        let app = Router::new()
            .route("/metrics", get(|| async { "" }))
            .layer(MetricsLayer::new());

        app.oneshot(
            axum::http::Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

        let count = HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/metrics", "200"])
            .get();
        assert_eq!(count, 0.0);
    }
}
