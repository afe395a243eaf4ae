mod sales_service;

pub use sales_service::{SalesService, DEFAULT_MAX_TEXT_LENGTH};
