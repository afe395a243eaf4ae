use crate::error::{AppError, Result};
use crate::models::{NewSale, Sale, SaleId};
use crate::state::{DeleteOutcome, SaleStore};
use async_trait::async_trait;
use chrono::Utc;
use sled::Db;
use std::path::Path;
use std::sync::Arc;

const NEXT_ID_KEY: &[u8] = b"next_sale_id";

/// Persistent sale store using Sled embedded database
#[derive(Clone)]
pub struct SledStore {
    db: Arc<Db>,
    sales_tree: sled::Tree,
    meta_tree: sled::Tree,
}

impl SledStore {
    /// Create a new Sled store at the specified path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref();
        let db = sled::open(&path).map_err(|e| {
            AppError::Database(format!("Failed to open Sled database: {}", e))
        })?;

        let sales_tree = db.open_tree("sales").map_err(|e| {
            AppError::Database(format!("Failed to open sales tree: {}", e))
        })?;

        let meta_tree = db.open_tree("meta").map_err(|e| {
            AppError::Database(format!("Failed to open meta tree: {}", e))
        })?;

        tracing::info!("Initialized Sled store at {:?}", path_str);

        Ok(Self {
            db: Arc::new(db),
            sales_tree,
            meta_tree,
        })
    }

    /// Serialize sale to bytes
    fn serialize_sale(sale: &Sale) -> Result<Vec<u8>> {
        bincode::serialize(sale).map_err(|e| {
            AppError::Serialization(format!("Failed to serialize sale: {}", e))
        })
    }

    /// Deserialize sale from bytes
    fn deserialize_sale(bytes: &[u8]) -> Result<Sale> {
        bincode::deserialize(bytes).map_err(|e| {
            AppError::Serialization(format!("Failed to deserialize sale: {}", e))
        })
    }

    /// Big-endian keys keep the tree in id order
    fn sale_key(id: SaleId) -> [u8; 4] {
        id.to_be_bytes()
    }

    /// Reserve the next sale id
    fn next_id(&self) -> Result<SaleId> {
        let updated = self
            .meta_tree
            .update_and_fetch(NEXT_ID_KEY, |current| {
                let next = match current {
                    Some(bytes) => {
                        let mut buf = [0u8; 4];
                        buf.copy_from_slice(&bytes[..4]);
                        i32::from_be_bytes(buf).saturating_add(1)
                    }
                    None => 1,
                };
                Some(next.to_be_bytes().to_vec())
            })
            .map_err(|e| AppError::Database(format!("Failed to allocate sale id: {}", e)))?
            .ok_or_else(|| AppError::Database("Sale id counter missing".to_string()))?;

        let mut buf = [0u8; 4];
        buf.copy_from_slice(&updated[..4]);
        let id = i32::from_be_bytes(buf);
        if id == SaleId::MAX {
            return Err(AppError::Database("Sale id space exhausted".to_string()));
        }
        Ok(id)
    }

    /// Flush pending writes to disk
    pub async fn flush(&self) -> Result<()> {
        self.db.flush_async().await.map_err(|e| {
            AppError::Database(format!("Failed to flush database: {}", e))
        })?;
        Ok(())
    }
}

#[async_trait]
impl SaleStore for SledStore {
    async fn insert(&self, sale: NewSale) -> Result<Sale> {
        let id = self.next_id()?;
        let sale = sale.into_sale(id, Utc::now());
        let value = Self::serialize_sale(&sale)?;

        self.sales_tree.insert(Self::sale_key(id), value).map_err(|e| {
            AppError::Database(format!("Failed to save sale: {}", e))
        })?;

        // Flush to ensure durability
        self.sales_tree.flush().map_err(|e| {
            AppError::Database(format!("Failed to flush sales tree: {}", e))
        })?;

        tracing::debug!(sale_id = id, "Sale saved to Sled");
        Ok(sale)
    }

    async fn get(&self, id: SaleId) -> Result<Option<Sale>> {
        match self.sales_tree.get(Self::sale_key(id)) {
            Ok(Some(bytes)) => Ok(Some(Self::deserialize_sale(&bytes)?)),
            Ok(None) => Ok(None),
            Err(e) => Err(AppError::Database(format!("Failed to get sale: {}", e))),
        }
    }

    async fn list_all(&self) -> Result<Vec<Sale>> {
        let mut sales = Vec::with_capacity(self.sales_tree.len());

        for result in self.sales_tree.iter() {
            let (_, value) = result.map_err(|e| {
                AppError::Database(format!("Failed to iterate sales: {}", e))
            })?;
            sales.push(Self::deserialize_sale(&value)?);
        }

        Ok(sales)
    }

    async fn delete(&self, id: SaleId) -> Result<DeleteOutcome> {
        let removed = self.sales_tree.remove(Self::sale_key(id)).map_err(|e| {
            AppError::Database(format!("Failed to delete sale: {}", e))
        })?;

        if removed.is_none() {
            return Ok(DeleteOutcome::NotFound);
        }

        self.sales_tree.flush().map_err(|e| {
            AppError::Database(format!("Failed to flush sales tree: {}", e))
        })?;

        tracing::debug!(sale_id = id, "Sale deleted from Sled");
        Ok(DeleteOutcome::Deleted)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.sales_tree.len() as u64)
    }

    async fn clear(&self) -> Result<()> {
        self.sales_tree.clear()?;
        self.sales_tree.flush()?;
        Ok(())
    }
}
