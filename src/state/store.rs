use crate::error::{AppError, Result};
use crate::models::{NewSale, Sale, SaleId};
use crate::state::{DeleteOutcome, SaleStore};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

/// In-memory sale store (for development and testing)
#[derive(Clone)]
pub struct InMemoryStore {
    sales: Arc<DashMap<SaleId, Sale>>,
    next_id: Arc<AtomicI32>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            sales: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicI32::new(1)),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SaleStore for InMemoryStore {
    async fn insert(&self, sale: NewSale) -> Result<Sale> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        if id <= 0 {
            return Err(AppError::Database("Sale id space exhausted".to_string()));
        }

        let sale = sale.into_sale(id, Utc::now());
        self.sales.insert(id, sale.clone());

        tracing::debug!(sale_id = id, "Sale saved");
        Ok(sale)
    }

    async fn get(&self, id: SaleId) -> Result<Option<Sale>> {
        Ok(self.sales.get(&id).map(|entry| entry.clone()))
    }

    async fn list_all(&self) -> Result<Vec<Sale>> {
        let mut sales: Vec<Sale> = self
            .sales
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        sales.sort_by_key(|s| s.id);
        Ok(sales)
    }

    async fn delete(&self, id: SaleId) -> Result<DeleteOutcome> {
        if self.sales.remove(&id).is_some() {
            tracing::debug!(sale_id = id, "Sale deleted");
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::NotFound)
        }
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.sales.len() as u64)
    }

    async fn clear(&self) -> Result<()> {
        self.sales.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn new_sale(product: &str, date: (i32, u32, u32)) -> NewSale {
        NewSale::new(
            product,
            "Electronics",
            1,
            dec!(10.00),
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let store = InMemoryStore::new();

        let first = store.insert(new_sale("Mouse", (2025, 10, 16))).await.unwrap();
        let second = store.insert(new_sale("Cable", (2025, 10, 19))).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.get(2).await.unwrap().unwrap().product_name, "Cable");
    }

    #[tokio::test]
    async fn test_delete_reports_outcome() {
        let store = InMemoryStore::new();
        let sale = store.insert(new_sale("Mouse", (2025, 10, 16))).await.unwrap();

        assert_eq!(store.delete(sale.id).await.unwrap(), DeleteOutcome::Deleted);
        assert_eq!(store.delete(sale.id).await.unwrap(), DeleteOutcome::NotFound);
        assert!(store.get(sale.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_orders() {
        let store = InMemoryStore::new();
        store.insert(new_sale("A", (2025, 10, 16))).await.unwrap();
        store.insert(new_sale("B", (2025, 10, 18))).await.unwrap();
        store.insert(new_sale("C", (2025, 10, 16))).await.unwrap();

        let all: Vec<_> = store.list_all().await.unwrap().into_iter().map(|s| s.product_name).collect();
        assert_eq!(all, vec!["A", "B", "C"]);

        let recent: Vec<_> = store.list_recent().await.unwrap().into_iter().map(|s| s.product_name).collect();
        assert_eq!(recent, vec!["B", "C", "A"]);
    }

    #[tokio::test]
    async fn test_clear_keeps_id_sequence() {
        let store = InMemoryStore::new();
        store.insert(new_sale("A", (2025, 10, 16))).await.unwrap();
        store.clear().await.unwrap();

        assert_eq!(store.count().await.unwrap(), 0);
        let next = store.insert(new_sale("B", (2025, 10, 16))).await.unwrap();
        assert_eq!(next.id, 2);
    }
}
