//! Checkout state persistence between requests.
//!
//! Decisions are projected into a [`CheckoutState`] and read back by the
//! gateway filter and the order metadata hook. Writes are last-write-wins:
//! two overlapping checkout refreshes can interleave and the later save
//! overwrites the earlier one, so the checkout page debounces its calls.

mod memory;
mod session;

use async_trait::async_trait;
use store_decision_core::CheckoutState;
use thiserror::Error;

pub use memory::MemoryCheckoutStore;
pub use session::SessionCheckoutStore;

/// Errors reading or writing checkout state.
#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("checkout state store unavailable: {0}")]
    Unavailable(String),
}

/// Where a customer's checkout state lives.
#[async_trait]
pub trait CheckoutStateStore: Send + Sync {
    /// Read the state, filling absent values with the shared defaults.
    async fn load(&self) -> Result<CheckoutState, ProjectionError>;

    /// Overwrite the state.
    async fn save(&self, state: &CheckoutState) -> Result<(), ProjectionError>;
}
