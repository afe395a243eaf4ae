//! Sales tracking backend: sale records, dashboard analytics and review
//! sentiment, served over GraphQL and REST.

pub mod analytics;
pub mod api;
pub mod config;
pub mod error;
pub mod graphql;
pub mod metrics;
pub mod models;
pub mod seed;
pub mod sentiment;
pub mod service;
pub mod state;

pub use error::{AppError, Result};
