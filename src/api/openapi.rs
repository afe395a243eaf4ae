//! OpenAPI description of the HTTP surface, served with Swagger UI at `/api-docs`

use crate::analytics::{AnalyticsReport, CategorySales, Kpis, TopProduct, TrendPoint};
use crate::api::handlers::{
    HealthResponse, SaleResponse, SentimentBatchRequest, SentimentRequest,
};
use crate::error::FieldError;
use crate::graphql::{GraphQLRequest, GraphQLResponse};
use crate::models::CreateSaleInput;
use crate::sentiment::{SentimentLabel, SentimentResult};
use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Path of the Swagger UI
pub const DOCS_PATH: &str = "/api-docs";

/// Path of the raw OpenAPI document
pub const OPENAPI_JSON_PATH: &str = "/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sales Analytics API",
        description = "Sales records, dashboard analytics and review sentiment.\n\nEvery operation is also available over GraphQL at `/graphql`.",
        license(name = "MIT OR Apache-2.0")
    ),
    servers(
        (url = "http://localhost:4000", description = "Development server")
    ),
    tags(
        (name = "graphql", description = "GraphQL endpoint for all operations"),
        (name = "health", description = "Health check endpoint for server status"),
        (name = "sales", description = "Sale records"),
        (name = "analytics", description = "Dashboard analytics"),
        (name = "sentiment", description = "Review sentiment scoring")
    ),
    paths(
        crate::graphql::graphql_handler,
        crate::api::handlers::health_check,
        crate::api::handlers::list_sales,
        crate::api::handlers::create_sale,
        crate::api::handlers::get_sale,
        crate::api::handlers::delete_sale,
        crate::api::handlers::get_analytics,
        crate::api::handlers::analyze_sentiment,
        crate::api::handlers::analyze_sentiment_batch,
    ),
    components(schemas(
        GraphQLRequest,
        GraphQLResponse,
        HealthResponse,
        SaleResponse,
        CreateSaleInput,
        FieldError,
        AnalyticsReport,
        Kpis,
        TrendPoint,
        TopProduct,
        CategorySales,
        SentimentRequest,
        SentimentBatchRequest,
        SentimentResult,
        SentimentLabel,
    ))
)]
pub struct ApiDoc;

/// Swagger UI plus the JSON document it renders
pub fn docs_routes() -> Router {
    SwaggerUi::new(DOCS_PATH)
        .url(OPENAPI_JSON_PATH, ApiDoc::openapi())
        .into()
}
