//! GraphQL context for request handling

use crate::service::SalesService;
use std::sync::Arc;

/// GraphQL context passed to all resolvers
#[derive(Clone)]
pub struct GraphQLContext {
    pub service: Arc<SalesService>,
}

impl GraphQLContext {
    pub fn new(service: Arc<SalesService>) -> Self {
        Self { service }
    }
}
