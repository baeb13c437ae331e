//! Checkout state projected into the customer session.
//!
//! The decision endpoint writes this state, and the gateway filter and the
//! order-creation hook read it back. Every reader goes through
//! [`CheckoutState::from_parts`], so the defaults for absent values are
//! defined here and nowhere else.

use serde::{Deserialize, Serialize};

use super::{PaymentAccounts, PaymentMethod, ShippingMethod, StoreId};

/// Store decision as remembered between checkout requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutState {
    /// Candidate store from zone or pickup choice.
    pub store_final: StoreId,
    /// Store after future-date and critical-window rules.
    pub effective_store_final: StoreId,
    /// Payment methods the decision allowed. Empty means "no restriction known".
    pub available_payment_methods: Vec<PaymentMethod>,
    /// Whether the order is scheduled for a later day.
    pub is_future_date: bool,
    /// Settlement accounts of the effective store.
    pub payment_accounts: PaymentAccounts,
    /// Pickup or delivery.
    pub shipping_method: ShippingMethod,
}

/// Raw session values, each possibly absent.
#[derive(Debug, Clone, Default)]
pub struct CheckoutStateParts {
    pub store_final: Option<StoreId>,
    pub effective_store_final: Option<StoreId>,
    pub available_payment_methods: Option<Vec<PaymentMethod>>,
    pub is_future_date: Option<bool>,
    pub payment_accounts: Option<PaymentAccounts>,
    pub shipping_method: Option<ShippingMethod>,
}

impl CheckoutState {
    /// Fill absent values with the shared defaults.
    ///
    /// - store: Central
    /// - effective store: the store (so Central when both are absent)
    /// - payment methods: empty
    /// - future date: false
    /// - accounts: the unassigned `central`/`central` pair
    /// - shipping: delivery
    #[must_use]
    pub fn from_parts(parts: CheckoutStateParts) -> Self {
        let store_final = parts.store_final.unwrap_or_default();
        Self {
            store_final,
            effective_store_final: parts.effective_store_final.unwrap_or(store_final),
            available_payment_methods: parts.available_payment_methods.unwrap_or_default(),
            is_future_date: parts.is_future_date.unwrap_or(false),
            payment_accounts: parts.payment_accounts.unwrap_or_default(),
            shipping_method: parts.shipping_method.unwrap_or_default(),
        }
    }
}

impl Default for CheckoutState {
    fn default() -> Self {
        Self::from_parts(CheckoutStateParts::default())
    }
}
