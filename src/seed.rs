//! Demo data loaded into an empty store on startup when enabled

use crate::models::NewSale;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// (product, category, quantity, price in cents, day of October 2025)
const DEMO_SALES: &[(&str, &str, u32, i64, u32)] = &[
    ("Laptop Pro", "Electronics", 2, 129_999, 15),
    ("Wireless Mouse", "Electronics", 5, 2_999, 16),
    ("Office Chair", "Furniture", 3, 24_999, 17),
    ("Desk Lamp", "Furniture", 4, 3_999, 18),
    ("USB-C Cable", "Electronics", 10, 1_299, 19),
    ("Monitor 27\"", "Electronics", 2, 39_999, 20),
    ("Ergonomic Keyboard", "Electronics", 3, 8_999, 21),
    ("Standing Desk", "Furniture", 1, 59_999, 22),
    ("Notebook Set", "Stationery", 15, 999, 23),
    ("Pen Pack", "Stationery", 20, 499, 24),
];

/// The demo catalogue, oldest sale first
pub fn demo_sales() -> Vec<NewSale> {
    DEMO_SALES
        .iter()
        .filter_map(|&(product, category, quantity, cents, day)| {
            let date = NaiveDate::from_ymd_opt(2025, 10, day)?;
            Some(NewSale::new(
                product,
                category,
                quantity,
                Decimal::new(cents, 2),
                date,
            ))
        })
        .collect()
}
