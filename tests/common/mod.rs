//! Shared fixtures for integration tests

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use sales_analytics::models::{NewSale, Sale};
use sales_analytics::service::SalesService;
use sales_analytics::state::InMemoryStore;
use std::str::FromStr;
use std::sync::Arc;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Noon UTC on the given day
pub fn instant(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

pub fn new_sale(product: &str, category: &str, quantity: u32, price: &str, day: NaiveDate) -> NewSale {
    NewSale::new(
        product,
        category,
        quantity,
        Decimal::from_str(price).unwrap(),
        day,
    )
}

/// A stored sale with a fixed id and creation time
pub fn sale(
    id: i32,
    product: &str,
    category: &str,
    quantity: u32,
    price: &str,
    day: NaiveDate,
) -> Sale {
    new_sale(product, category, quantity, price, day).into_sale(id, instant(2025, 10, 1))
}

/// The three-sale example used across the dashboard tests
pub fn example_sales() -> Vec<Sale> {
    vec![
        sale(1, "Laptop Pro", "Electronics", 2, "1299.99", date(2025, 10, 15)),
        sale(2, "Wireless Mouse", "Electronics", 5, "29.99", date(2025, 10, 16)),
        sale(3, "Office Chair", "Furniture", 3, "249.99", date(2025, 10, 17)),
    ]
}

pub fn in_memory_service() -> Arc<SalesService> {
    Arc::new(SalesService::new(Arc::new(InMemoryStore::new())))
}
