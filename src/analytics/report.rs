//! Report structures produced by the aggregator

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Headline figures over every stored sale
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    /// Sum of all sale totals
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_revenue: Decimal,

    /// Number of sales
    pub total_sales: u64,

    /// `total_revenue / total_sales`, zero when there are no sales
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub avg_order_value: Decimal,
}

/// Revenue for one calendar day inside the trend window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,

    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub revenue: Decimal,

    pub sales_count: u64,
}

/// Per-product rollup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub product_name: String,

    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_revenue: Decimal,

    pub total_quantity: u64,
}

/// Per-category rollup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategorySales {
    pub category: String,

    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_revenue: Decimal,

    pub sales_count: u64,
}

/// Complete dashboard analytics, recomputed for every request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub kpis: Kpis,

    /// Ascending by date; days without sales are absent
    pub trends: Vec<TrendPoint>,

    /// Descending by revenue
    pub top_products: Vec<TopProduct>,

    /// Descending by revenue
    pub sales_by_category: Vec<CategorySales>,
}

impl AnalyticsReport {
    /// True when the report was built from no sales at all
    pub fn is_empty(&self) -> bool {
        self.kpis.total_sales == 0
    }
}
