//! Order routing metadata storage.
//!
//! The commerce runtime calls the order metadata endpoint once per created
//! order; the values are read back by fulfillment and reconciliation.

use std::collections::HashMap;

use async_trait::async_trait;
use store_decision_core::{OrderId, OrderStoreMetadata};
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors storing or reading order metadata.
#[derive(Debug, Error)]
pub enum OrderMetadataError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Data corruption: {0}")]
    DataCorruption(String),
}

/// Persistent store for [`OrderStoreMetadata`], keyed by order.
#[async_trait]
pub trait OrderMetadataStore: Send + Sync {
    /// Insert or replace the metadata of an order.
    async fn upsert(&self, metadata: &OrderStoreMetadata) -> Result<(), OrderMetadataError>;

    /// Metadata of an order, if recorded.
    async fn get(&self, order_id: OrderId) -> Result<Option<OrderStoreMetadata>, OrderMetadataError>;
}

/// Order metadata kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryOrderMetadataStore {
    orders: RwLock<HashMap<OrderId, OrderStoreMetadata>>,
}

impl MemoryOrderMetadataStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderMetadataStore for MemoryOrderMetadataStore {
    async fn upsert(&self, metadata: &OrderStoreMetadata) -> Result<(), OrderMetadataError> {
        self.orders
            .write()
            .await
            .insert(metadata.order_id, metadata.clone());
        Ok(())
    }

    async fn get(&self, order_id: OrderId) -> Result<Option<OrderStoreMetadata>, OrderMetadataError> {
        Ok(self.orders.read().await.get(&order_id).cloned())
    }
}
