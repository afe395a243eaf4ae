//! GraphQL types for sales

use async_graphql::*;
use rust_decimal::Decimal;

use super::common::{DateScalar, DateTimeScalar};
use crate::models;

/// A recorded sale
#[derive(Clone)]
pub struct Sale(pub models::Sale);

#[Object]
impl Sale {
    async fn id(&self) -> i32 {
        self.0.id
    }

    async fn product_name(&self) -> &str {
        &self.0.product_name
    }

    async fn category(&self) -> &str {
        &self.0.category
    }

    async fn quantity(&self) -> u32 {
        self.0.quantity
    }

    /// Unit price
    async fn price(&self) -> Decimal {
        self.0.price
    }

    /// Quantity times unit price
    async fn total_amount(&self) -> Decimal {
        self.0.total_amount
    }

    async fn sale_date(&self) -> DateScalar {
        self.0.sale_date.into()
    }

    /// When the sale was recorded
    async fn created_at(&self) -> DateTimeScalar {
        self.0.created_at.into()
    }
}

/// Input for recording a sale
#[derive(InputObject, Debug, Clone)]
pub struct CreateSaleInput {
    pub product_name: String,
    pub category: String,
    pub quantity: i32,
    pub price: f64,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    pub sale_date: String,
}

impl From<CreateSaleInput> for models::CreateSaleInput {
    fn from(input: CreateSaleInput) -> Self {
        models::CreateSaleInput {
            product_name: input.product_name,
            category: input.category,
            quantity: i64::from(input.quantity),
            price: input.price,
            sale_date: input.sale_date,
        }
    }
}
