//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::decision::DecisionEngine;
use crate::orders::OrderMetadataStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Everything inside is
/// immutable after startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    engine: DecisionEngine,
    orders: Arc<dyn OrderMetadataStore>,
    pool: Option<PgPool>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `engine` - Store decision engine
    /// * `orders` - Order metadata store
    /// * `pool` - `PostgreSQL` pool, checked by the readiness probe
    #[must_use]
    pub fn new(
        engine: DecisionEngine,
        orders: Arc<dyn OrderMetadataStore>,
        pool: Option<PgPool>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                engine,
                orders,
                pool,
            }),
        }
    }

    /// Get a reference to the decision engine.
    #[must_use]
    pub fn engine(&self) -> &DecisionEngine {
        &self.inner.engine
    }

    /// Get a reference to the order metadata store.
    #[must_use]
    pub fn orders(&self) -> &dyn OrderMetadataStore {
        self.inner.orders.as_ref()
    }

    /// Get the database pool, when one is configured.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }
}
