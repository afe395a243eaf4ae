use crate::analytics::{start_of_day, AnalyticsReport};
use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::metrics::gather_metrics;
use crate::models::{parse_sale_date, CreateSaleInput, Sale, SaleId};
use crate::sentiment::SentimentResult;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Endpoint index
pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "Sales Analytics API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "graphql": "/graphql",
            "docs": "/api-docs",
            "health": "/health",
            "metrics": "/metrics",
            "sales": "/v1/sales",
            "analytics": "/v1/analytics",
            "sentiment": "/v1/sentiment",
        }
    }))
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Server is running", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
    })
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

/// Prometheus scrape endpoint
pub async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        gather_metrics(),
    )
}

/// List sales, newest first
#[utoipa::path(
    get,
    path = "/v1/sales",
    tag = "sales",
    responses(
        (status = 200, description = "All sales, newest sale date first", body = [SaleResponse])
    )
)]
pub async fn list_sales(State(state): State<AppState>) -> Result<Json<Vec<SaleResponse>>> {
    let sales = state.service.list_sales().await?;
    Ok(Json(sales.into_iter().map(SaleResponse::from).collect()))
}

/// Record a sale
#[utoipa::path(
    post,
    path = "/v1/sales",
    tag = "sales",
    request_body = CreateSaleInput,
    responses(
        (status = 201, description = "Sale recorded", body = SaleResponse),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn create_sale(
    State(state): State<AppState>,
    Json(request): Json<CreateSaleInput>,
) -> Result<(StatusCode, Json<SaleResponse>)> {
    let sale = state.service.create_sale(request).await?;
    Ok((StatusCode::CREATED, Json(SaleResponse::from(sale))))
}

/// Get a sale by ID
#[utoipa::path(
    get,
    path = "/v1/sales/{id}",
    tag = "sales",
    params(("id" = i32, Path, description = "Sale id")),
    responses(
        (status = 200, description = "The sale", body = SaleResponse),
        (status = 404, description = "Sale not found")
    )
)]
pub async fn get_sale(
    State(state): State<AppState>,
    Path(id): Path<SaleId>,
) -> Result<Json<SaleResponse>> {
    let sale = state.service.get_sale(id).await?;
    Ok(Json(SaleResponse::from(sale)))
}

/// Delete a sale
#[utoipa::path(
    delete,
    path = "/v1/sales/{id}",
    tag = "sales",
    params(("id" = i32, Path, description = "Sale id")),
    responses(
        (status = 204, description = "Sale deleted"),
        (status = 404, description = "Sale not found")
    )
)]
pub async fn delete_sale(
    State(state): State<AppState>,
    Path(id): Path<SaleId>,
) -> Result<StatusCode> {
    state.service.delete_sale(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AnalyticsQuery {
    /// Last day of the trend window (`YYYY-MM-DD`); defaults to today
    pub as_of: Option<String>,
}

/// Dashboard analytics
#[utoipa::path(
    get,
    path = "/v1/analytics",
    tag = "analytics",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "KPIs, trend, top products and categories", body = AnalyticsReport),
        (status = 400, description = "Invalid asOf date")
    )
)]
pub async fn get_analytics(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsReport>> {
    let reference = match query.as_of.as_deref() {
        Some(raw) => {
            let date = parse_sale_date(raw)
                .ok_or_else(|| AppError::invalid_field("asOf", "Invalid date format"))?;
            start_of_day(date)
        }
        None => Utc::now(),
    };

    let report = state.service.analytics(reference).await?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SentimentRequest {
    pub text: String,
}

/// Score one text
#[utoipa::path(
    post,
    path = "/v1/sentiment",
    tag = "sentiment",
    request_body = SentimentRequest,
    responses(
        (status = 200, description = "Sentiment of the text", body = SentimentResult),
        (status = 400, description = "Text missing or too long")
    )
)]
pub async fn analyze_sentiment(
    State(state): State<AppState>,
    Json(request): Json<SentimentRequest>,
) -> Result<Json<SentimentResult>> {
    let result = state.service.analyze_sentiment(&request.text)?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SentimentBatchRequest {
    #[validate(length(min = 1, max = 100, message = "Provide between 1 and 100 texts"))]
    pub texts: Vec<String>,
}

/// Score several texts
#[utoipa::path(
    post,
    path = "/v1/sentiment/batch",
    tag = "sentiment",
    request_body = SentimentBatchRequest,
    responses(
        (status = 200, description = "One result per text, in request order", body = [SentimentResult]),
        (status = 400, description = "Empty batch, more than 100 texts, or an invalid text")
    )
)]
pub async fn analyze_sentiment_batch(
    State(state): State<AppState>,
    Json(request): Json<SentimentBatchRequest>,
) -> Result<Json<Vec<SentimentResult>>> {
    request.validate()?;

    let results = state.service.analyze_sentiment_batch(&request.texts)?;
    Ok(Json(results))
}

/// Sale as returned over REST, money as JSON numbers
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleResponse {
    pub id: SaleId,
    pub product_name: String,
    pub category: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_amount: Decimal,
    #[schema(value_type = String, format = Date)]
    pub sale_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<Sale> for SaleResponse {
    fn from(sale: Sale) -> Self {
        Self {
            id: sale.id,
            product_name: sale.product_name,
            category: sale.category,
            quantity: sale.quantity,
            price: sale.price,
            total_amount: sale.total_amount,
            sale_date: sale.sale_date,
            created_at: sale.created_at,
        }
    }
}
