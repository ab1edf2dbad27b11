use chrono::Utc;
use indexmap::IndexMap;

use crate::models::{NewProduct, Product};

const FIRST_ID: i64 = 1;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("product id sequence exhausted")]
    IdSequenceExhausted,
}

/// Authoritative in-memory product records plus the id sequence.
///
/// Not synchronized by itself: the app shares it as `Arc<RwLock<CatalogStore>>`,
/// so a `create` under the write lock assigns and inserts atomically.
#[derive(Debug)]
pub struct CatalogStore {
    products: IndexMap<i64, Product>,
    next_id: i64,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self {
            products: IndexMap::new(),
            next_id: FIRST_ID,
        }
    }
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns the next id, stamps the current time and stores the product.
    /// On error nothing is stored and the sequence does not move.
    pub fn create(&mut self, new: NewProduct) -> Result<Product, StoreError> {
        let id = self.next_id;
        let next_id = id.checked_add(1).ok_or(StoreError::IdSequenceExhausted)?;

        let product = Product::new(id, new, Utc::now());
        self.products.insert(id, product.clone());
        self.next_id = next_id;

        Ok(product)
    }

    pub fn get(&self, id: i64) -> Option<Product> {
        self.products.get(&id).cloned()
    }

    /// Snapshot of every record in creation order.
    #[allow(dead_code)]
    pub fn list(&self) -> IndexMap<i64, Product> {
        self.products.clone()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Drops all records and restarts the sequence at 1.
    pub fn clear(&mut self) {
        self.products.clear();
        self.next_id = FIRST_ID;
    }

    #[cfg(test)]
    pub(crate) fn with_next_id(next_id: i64) -> Self {
        Self {
            products: IndexMap::new(),
            next_id,
        }
    }
}
