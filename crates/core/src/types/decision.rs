//! The store decision and its wire representation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Cep, CheckoutState, PaymentAccounts, PaymentMethod, ShippingMethod, StoreId, ZoneId};

/// Outcome of one store decision.
///
/// Built once per request and never stored as such; it is projected into
/// the session ([`CheckoutState`]) and answered as a [`DecisionResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreDecision {
    pub cep: Cep,
    pub shipping_method: ShippingMethod,
    /// Scheduled delivery or pickup date, when one parsed.
    pub scheduled_date: Option<NaiveDate>,
    pub is_future_date: bool,
    /// Zone matched for the CEP. `None` for pickup or an unmatched CEP.
    pub zone_id: Option<ZoneId>,
    /// Candidate store, before the critical-window override.
    pub store_final: StoreId,
    pub force_central: bool,
    pub effective_store_final: StoreId,
    pub payment_methods: Vec<PaymentMethod>,
    pub payment_accounts: PaymentAccounts,
    /// Fulfillment id of `store_final`.
    pub pickup_store_id: String,
    /// Whether this is the Central-pinned safety decision.
    pub fallback: bool,
}

impl StoreDecision {
    /// Session projection of this decision.
    #[must_use]
    pub fn checkout_state(&self) -> CheckoutState {
        CheckoutState {
            store_final: self.store_final,
            effective_store_final: self.effective_store_final,
            available_payment_methods: self.payment_methods.clone(),
            is_future_date: self.is_future_date,
            payment_accounts: self.payment_accounts.clone(),
            shipping_method: self.shipping_method,
        }
    }

    /// Response body for the decision endpoint.
    #[must_use]
    pub fn response(&self) -> DecisionResponse {
        DecisionResponse {
            store_final: self.store_final,
            effective_store_final: self.effective_store_final,
            pickup_store_id: self.pickup_store_id.clone(),
            payment_methods: self.payment_methods.clone(),
            payment_accounts: self.payment_accounts.clone(),
        }
    }
}

/// JSON body returned by the decision endpoint, for success and fallback alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionResponse {
    pub store_final: StoreId,
    pub effective_store_final: StoreId,
    pub pickup_store_id: String,
    pub payment_methods: Vec<PaymentMethod>,
    pub payment_accounts: PaymentAccounts,
}
