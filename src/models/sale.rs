use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::{AppError, Result};

/// Store-assigned sale identifier
pub type SaleId = i32;

/// Format used for sale dates on the wire
pub const SALE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest `quantity * price` accepted for one sale (10 000 000 000).
///
/// Revenue sums over any realistic number of stored sales stay far below
/// `Decimal::MAX`.
pub const MAX_TOTAL_AMOUNT: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0);

/// A recorded sale
///
/// Money fields are serialized as decimal strings so the record survives
/// binary encoding without float rounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Unique identifier
    pub id: SaleId,

    /// Product sold
    pub product_name: String,

    /// Product category
    pub category: String,

    /// Units sold
    pub quantity: u32,

    /// Unit price
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,

    /// `quantity * price`, fixed at creation time
    #[serde(with = "rust_decimal::serde::str")]
    pub total_amount: Decimal,

    /// Calendar date of the sale
    pub sale_date: NaiveDate,

    /// When the record was stored
    pub created_at: DateTime<Utc>,
}

/// A validated sale that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSale {
    pub product_name: String,
    pub category: String,
    pub quantity: u32,
    pub price: Decimal,
    pub total_amount: Decimal,
    pub sale_date: NaiveDate,
}

impl NewSale {
    /// Build a sale from already-trusted parts, deriving the total.
    ///
    /// The total saturates at `Decimal::MAX`; untrusted input goes through
    /// [`CreateSaleInput::validate_into`] instead.
    pub fn new(
        product_name: impl Into<String>,
        category: impl Into<String>,
        quantity: u32,
        price: Decimal,
        sale_date: NaiveDate,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            category: category.into(),
            quantity,
            price,
            total_amount: Decimal::from(quantity).saturating_mul(price),
            sale_date,
        }
    }

    /// Attach the identity assigned by a store
    pub fn into_sale(self, id: SaleId, created_at: DateTime<Utc>) -> Sale {
        Sale {
            id,
            product_name: self.product_name,
            category: self.category,
            quantity: self.quantity,
            price: self.price,
            total_amount: self.total_amount,
            sale_date: self.sale_date,
            created_at,
        }
    }
}

/// Raw create request as received from a client
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleInput {
    #[validate(length(min = 1, max = 255, message = "Product name must be 1-255 characters"))]
    pub product_name: String,

    #[validate(length(min = 1, max = 100, message = "Category must be 1-100 characters"))]
    pub category: String,

    #[validate(range(min = 1, message = "Quantity must be positive"))]
    pub quantity: i64,

    #[validate(range(exclusive_min = 0.0, message = "Price must be positive"))]
    pub price: f64,

    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    #[validate(custom(function = "validate_sale_date"))]
    #[schema(example = "2025-10-15")]
    pub sale_date: String,
}

impl CreateSaleInput {
    /// Validate the request and turn it into a [`NewSale`]
    pub fn validate_into(self) -> Result<NewSale> {
        self.validate()?;

        let quantity = u32::try_from(self.quantity)
            .map_err(|_| AppError::invalid_field("quantity", "Quantity is too large"))?;
        let price = Decimal::from_f64(self.price)
            .ok_or_else(|| AppError::invalid_field("price", "Price is too large"))?
            .round_dp(2);
        if price <= Decimal::ZERO {
            return Err(AppError::invalid_field("price", "Price must be positive"));
        }
        let total_amount = Decimal::from(quantity)
            .checked_mul(price)
            .filter(|total| *total <= MAX_TOTAL_AMOUNT)
            .ok_or_else(|| AppError::invalid_field("price", "Total amount is too large"))?;
        let sale_date = parse_sale_date(&self.sale_date)
            .ok_or_else(|| AppError::invalid_field("saleDate", "Invalid date format"))?;

        Ok(NewSale {
            product_name: self.product_name,
            category: self.category,
            quantity,
            price,
            total_amount,
            sale_date,
        })
    }
}

/// Parse a sale date given either as `YYYY-MM-DD` or as an RFC 3339 timestamp.
///
/// Timestamps are reduced to their UTC calendar date.
pub fn parse_sale_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, SALE_DATE_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
}

fn validate_sale_date(value: &str) -> std::result::Result<(), ValidationError> {
    if parse_sale_date(value).is_some() {
        Ok(())
    } else {
        let mut err = ValidationError::new("date");
        err.message = Some("Invalid date format".into());
        Err(err)
    }
}
