//! Metrics integration for GraphQL
//!
//! Tracks operation execution time and errors

use async_graphql::extensions::{
    Extension, ExtensionContext, ExtensionFactory, NextExecute, NextParseQuery,
};
use async_graphql::parser::types::ExecutableDocument;
use async_graphql::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::metrics::{GRAPHQL_QUERIES_TOTAL, GRAPHQL_QUERY_DURATION};

/// GraphQL metrics extension
pub struct MetricsExtension;

impl ExtensionFactory for MetricsExtension {
    fn create(&self) -> Arc<dyn Extension> {
        Arc::new(MetricsExtensionImpl)
    }
}

struct MetricsExtensionImpl;

#[async_trait::async_trait]
impl Extension for MetricsExtensionImpl {
    async fn parse_query(
        &self,
        ctx: &ExtensionContext<'_>,
        query: &str,
        variables: &Variables,
        next: NextParseQuery<'_>,
    ) -> ServerResult<ExecutableDocument> {
        let result = next.run(ctx, query, variables).await;

        if result.is_err() {
            warn!(query_length = query.len(), "GraphQL query parse failed");
            GRAPHQL_QUERIES_TOTAL
                .with_label_values(&["unknown", "parse_error"])
                .inc();
        }

        result
    }

    async fn execute(
        &self,
        ctx: &ExtensionContext<'_>,
        operation_name: Option<&str>,
        next: NextExecute<'_>,
    ) -> Response {
        let start = Instant::now();
        let response = next.run(ctx, operation_name).await;
        let duration = start.elapsed();

        let operation = operation_name.unwrap_or("anonymous");
        let error_count = response.errors.len();

        if error_count > 0 {
            info!(
                operation,
                duration_ms = duration.as_millis() as u64,
                error_count,
                "GraphQL operation completed with errors"
            );
        } else {
            debug!(
                operation,
                duration_ms = duration.as_millis() as u64,
                "GraphQL operation completed"
            );
        }

        let status = if error_count > 0 { "error" } else { "success" };
        GRAPHQL_QUERIES_TOTAL
            .with_label_values(&[operation, status])
            .inc();
        GRAPHQL_QUERY_DURATION
            .with_label_values(&[operation])
            .observe(duration.as_secs_f64());

        response
    }
}
