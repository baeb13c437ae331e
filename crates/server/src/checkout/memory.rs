//! In-process checkout state, for offline decisions and tests.

use async_trait::async_trait;
use store_decision_core::CheckoutState;
use tokio::sync::RwLock;

use super::{CheckoutStateStore, ProjectionError};

/// Checkout state held in memory for a single customer.
#[derive(Debug, Default)]
pub struct MemoryCheckoutStore {
    state: RwLock<Option<CheckoutState>>,
}

impl MemoryCheckoutStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last saved state, if any.
    pub async fn snapshot(&self) -> Option<CheckoutState> {
        self.state.read().await.clone()
    }
}

#[async_trait]
impl CheckoutStateStore for MemoryCheckoutStore {
    async fn load(&self) -> Result<CheckoutState, ProjectionError> {
        Ok(self.snapshot().await.unwrap_or_default())
    }

    async fn save(&self, state: &CheckoutState) -> Result<(), ProjectionError> {
        *self.state.write().await = Some(state.clone());
        Ok(())
    }
}
