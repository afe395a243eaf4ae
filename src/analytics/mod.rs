//! Dashboard analytics
//!
//! Turns a snapshot of stored sales into the figures shown on the dashboard:
//!
//! - **KPIs**: total revenue, number of sales, average order value
//! - **Trend**: revenue and sale count per calendar day over a trailing window
//! - **Top products**: products ranked by revenue, truncated to a limit
//! - **Sales by category**: every category ranked by revenue
//!
//! Reports are derived on every request and never stored.
//!
//! # Example
//!
//! ```
//! use sales_analytics::analytics::Aggregator;
//! use chrono::Utc;
//!
//! let report = Aggregator::default().compute(&[], Utc::now());
//! assert_eq!(report.kpis.total_sales, 0);
//! assert!(report.trends.is_empty());
//! ```

mod aggregation;
mod report;

pub use aggregation::{start_of_day, Aggregator, AggregatorConfig};
pub use report::{AnalyticsReport, CategorySales, Kpis, TopProduct, TrendPoint};
