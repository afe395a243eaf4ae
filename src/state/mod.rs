pub mod store;
pub mod sled_store;
pub mod factory;

pub use store::*;
pub use sled_store::SledStore;
pub use factory::{create_store, create_in_memory_store};

use crate::error::Result;
use crate::models::{NewSale, Sale, SaleId};
use async_trait::async_trait;

/// Result of a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The sale existed and was removed
    Deleted,
    /// No sale with that id
    NotFound,
}

/// Trait for sale storage operations
#[async_trait]
pub trait SaleStore: Send + Sync {
    /// Store a validated sale, assigning its id and creation time
    async fn insert(&self, sale: NewSale) -> Result<Sale>;

    /// Get a sale by ID
    async fn get(&self, id: SaleId) -> Result<Option<Sale>>;

    /// Every sale in id order
    async fn list_all(&self) -> Result<Vec<Sale>>;

    /// Every sale, newest sale date first (ties: newest record first)
    async fn list_recent(&self) -> Result<Vec<Sale>> {
        let mut sales = self.list_all().await?;
        sort_recent_first(&mut sales);
        Ok(sales)
    }

    /// Delete a sale by ID
    async fn delete(&self, id: SaleId) -> Result<DeleteOutcome>;

    /// Number of stored sales
    async fn count(&self) -> Result<u64>;

    /// Remove every sale
    async fn clear(&self) -> Result<()>;
}

/// Dashboard listing order
pub fn sort_recent_first(sales: &mut [Sale]) {
    sales.sort_by(|a, b| {
        b.sale_date
            .cmp(&a.sale_date)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| b.id.cmp(&a.id))
    });
}
