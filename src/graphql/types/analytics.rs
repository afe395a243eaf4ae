//! GraphQL types for the dashboard report
//!
//! Money is exposed as `Float`, matching what dashboard charts consume.

use async_graphql::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::analytics;
use crate::models::SALE_DATE_FORMAT;

fn money(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

#[derive(Clone)]
pub struct Analytics(pub analytics::AnalyticsReport);

#[Object]
impl Analytics {
    async fn kpis(&self) -> Kpis {
        Kpis(self.0.kpis.clone())
    }

    /// Daily revenue over the trailing window, oldest first
    async fn trends(&self) -> Vec<Trend> {
        self.0.trends.iter().cloned().map(Trend).collect()
    }

    async fn top_products(&self) -> Vec<TopProduct> {
        self.0.top_products.iter().cloned().map(TopProduct).collect()
    }

    async fn sales_by_category(&self) -> Vec<SalesByCategory> {
        self.0
            .sales_by_category
            .iter()
            .cloned()
            .map(SalesByCategory)
            .collect()
    }
}

#[derive(Clone)]
pub struct Kpis(pub analytics::Kpis);

#[Object(name = "KPIs")]
impl Kpis {
    async fn total_revenue(&self) -> f64 {
        money(self.0.total_revenue)
    }

    async fn total_sales(&self) -> u64 {
        self.0.total_sales
    }

    async fn avg_order_value(&self) -> f64 {
        money(self.0.avg_order_value)
    }
}

#[derive(Clone)]
pub struct Trend(pub analytics::TrendPoint);

#[Object]
impl Trend {
    /// `YYYY-MM-DD`
    async fn date(&self) -> String {
        self.0.date.format(SALE_DATE_FORMAT).to_string()
    }

    async fn revenue(&self) -> f64 {
        money(self.0.revenue)
    }

    async fn sales_count(&self) -> u64 {
        self.0.sales_count
    }
}

#[derive(Clone)]
pub struct TopProduct(pub analytics::TopProduct);

#[Object]
impl TopProduct {
    async fn product_name(&self) -> &str {
        &self.0.product_name
    }

    async fn total_revenue(&self) -> f64 {
        money(self.0.total_revenue)
    }

    async fn total_quantity(&self) -> u64 {
        self.0.total_quantity
    }
}

#[derive(Clone)]
pub struct SalesByCategory(pub analytics::CategorySales);

#[Object]
impl SalesByCategory {
    async fn category(&self) -> &str {
        &self.0.category
    }

    async fn total_revenue(&self) -> f64 {
        money(self.0.total_revenue)
    }

    async fn sales_count(&self) -> u64 {
        self.0.sales_count
    }
}
