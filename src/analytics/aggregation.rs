//! Sale aggregation: KPIs, daily trend, product and category rollups

use crate::analytics::report::{AnalyticsReport, CategorySales, Kpis, TopProduct, TrendPoint};
use crate::config::{default_top_products_limit, default_trend_window_days};
use crate::models::Sale;
use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Tunables for [`Aggregator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Length of the trailing trend window in days
    pub trend_window_days: u32,

    /// Maximum number of ranked products
    pub top_products_limit: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            trend_window_days: default_trend_window_days(),
            top_products_limit: default_top_products_limit(),
        }
    }
}

impl From<&crate::config::AnalyticsConfig> for AggregatorConfig {
    fn from(config: &crate::config::AnalyticsConfig) -> Self {
        Self {
            trend_window_days: config.trend_window_days,
            top_products_limit: config.top_products_limit,
        }
    }
}

/// Midnight UTC at the start of `date`, for use as a report reference instant
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Turns a snapshot of sales into an [`AnalyticsReport`].
///
/// The aggregator is a pure function of its inputs: it never reads the clock
/// or touches storage, so the caller supplies both the sales and the
/// reference instant. Rankings with equal revenue keep the order in which
/// their key first appeared in the input. Revenue sums saturate at
/// `Decimal::MAX` rather than overflow.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    config: AggregatorConfig,
}

impl Aggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    /// Build the full report for `sales` as seen at `reference`
    pub fn compute(&self, sales: &[Sale], reference: DateTime<Utc>) -> AnalyticsReport {
        AnalyticsReport {
            kpis: Self::kpis(sales),
            trends: self.trends(sales, reference),
            top_products: self.top_products(sales),
            sales_by_category: Self::sales_by_category(sales),
        }
    }

    /// Revenue, count and average order value over all sales
    pub fn kpis(sales: &[Sale]) -> Kpis {
        let total_revenue = sales
            .iter()
            .fold(Decimal::ZERO, |acc, s| acc.saturating_add(s.total_amount));
        let total_sales = sales.len() as u64;
        let avg_order_value = if total_sales > 0 {
            total_revenue / Decimal::from(total_sales)
        } else {
            Decimal::ZERO
        };

        Kpis {
            total_revenue,
            total_sales,
            avg_order_value,
        }
    }

    /// Inclusive `[first, last]` date range of the trend window ending at `reference`
    pub fn trend_window(&self, reference: DateTime<Utc>) -> (NaiveDate, NaiveDate) {
        let last = reference.date_naive();
        let first = last
            .checked_sub_days(Days::new(u64::from(self.config.trend_window_days)))
            .unwrap_or(NaiveDate::MIN);
        (first, last)
    }

    /// Daily revenue inside the trailing window, ascending by date
    pub fn trends(&self, sales: &[Sale], reference: DateTime<Utc>) -> Vec<TrendPoint> {
        let (first, last) = self.trend_window(reference);

        let mut by_day: BTreeMap<NaiveDate, (Decimal, u64)> = BTreeMap::new();
        for sale in sales
            .iter()
            .filter(|s| s.sale_date >= first && s.sale_date <= last)
        {
            let bucket = by_day.entry(sale.sale_date).or_insert((Decimal::ZERO, 0));
            bucket.0 = bucket.0.saturating_add(sale.total_amount);
            bucket.1 += 1;
        }

        by_day
            .into_iter()
            .map(|(date, (revenue, sales_count))| TrendPoint {
                date,
                revenue,
                sales_count,
            })
            .collect()
    }

    /// Best-selling products by revenue, at most `top_products_limit`
    pub fn top_products(&self, sales: &[Sale]) -> Vec<TopProduct> {
        let mut rollup: Rollup<(Decimal, u64)> = Rollup::default();
        for sale in sales {
            let group = rollup.entry(&sale.product_name);
            group.0 = group.0.saturating_add(sale.total_amount);
            group.1 += u64::from(sale.quantity);
        }

        let mut products: Vec<TopProduct> = rollup
            .into_groups()
            .map(|(product_name, (total_revenue, total_quantity))| TopProduct {
                product_name,
                total_revenue,
                total_quantity,
            })
            .collect();

        // stable: equal revenue keeps first-seen order
        products.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));
        products.truncate(self.config.top_products_limit);
        products
    }

    /// Revenue and count per category, descending by revenue
    pub fn sales_by_category(sales: &[Sale]) -> Vec<CategorySales> {
        let mut rollup: Rollup<(Decimal, u64)> = Rollup::default();
        for sale in sales {
            let group = rollup.entry(&sale.category);
            group.0 = group.0.saturating_add(sale.total_amount);
            group.1 += 1;
        }

        let mut categories: Vec<CategorySales> = rollup
            .into_groups()
            .map(|(category, (total_revenue, sales_count))| CategorySales {
                category,
                total_revenue,
                sales_count,
            })
            .collect();

        categories.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));
        categories
    }
}

/// Groups keyed by string, iterated in first-seen order
struct Rollup<V> {
    index: HashMap<String, usize>,
    groups: Vec<(String, V)>,
}

impl<V> Default for Rollup<V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }
}

impl<V: Default> Rollup<V> {
    fn entry(&mut self, key: &str) -> &mut V {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                let slot = self.groups.len();
                self.index.insert(key.to_string(), slot);
                self.groups.push((key.to_string(), V::default()));
                slot
            }
        };
        &mut self.groups[slot].1
    }

    fn into_groups(self) -> impl Iterator<Item = (String, V)> {
        self.groups.into_iter()
    }
}
