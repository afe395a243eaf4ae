pub mod handlers;
pub mod openapi;
pub mod rate_limit;
pub mod routes;

pub use routes::*;

use crate::service::SalesService;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SalesService>,
}

impl AppState {
    pub fn new(service: Arc<SalesService>) -> Self {
        Self { service }
    }
}
