//! Common GraphQL types and scalars

use async_graphql::*;
use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{parse_sale_date, SALE_DATE_FORMAT};

/// Calendar date, `YYYY-MM-DD` on the wire
#[derive(Clone, Copy, Debug)]
pub struct DateScalar(pub NaiveDate);

#[Scalar(name = "Date")]
impl ScalarType for DateScalar {
    fn parse(value: Value) -> InputValueResult<Self> {
        if let Value::String(s) = &value {
            parse_sale_date(s)
                .map(DateScalar)
                .ok_or_else(|| InputValueError::custom(format!("Invalid date: {}", s)))
        } else {
            Err(InputValueError::expected_type(value))
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.format(SALE_DATE_FORMAT).to_string())
    }
}

impl From<NaiveDate> for DateScalar {
    fn from(date: NaiveDate) -> Self {
        DateScalar(date)
    }
}

/// RFC 3339 timestamp
#[derive(Clone, Copy, Debug)]
pub struct DateTimeScalar(pub DateTime<Utc>);

#[Scalar(name = "DateTime")]
impl ScalarType for DateTimeScalar {
    fn parse(value: Value) -> InputValueResult<Self> {
        if let Value::String(s) = value {
            Ok(DateTimeScalar(
                DateTime::parse_from_rfc3339(&s)
                    .map_err(|e| InputValueError::custom(format!("Invalid datetime: {}", e)))?
                    .with_timezone(&Utc),
            ))
        } else {
            Err(InputValueError::expected_type(value))
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for DateTimeScalar {
    fn from(dt: DateTime<Utc>) -> Self {
        DateTimeScalar(dt)
    }
}

/// Service health
#[derive(SimpleObject, Debug, Clone)]
pub struct HealthInfo {
    pub status: String,
    pub version: String,
    pub timestamp: DateTimeScalar,
}
