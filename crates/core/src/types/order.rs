//! Store routing metadata attached to an order at creation time.

use serde::{Deserialize, Serialize};

use super::{CheckoutState, OrderId, ShippingMethod, StoreId};
use crate::rules::StoreRegistry;

/// Routing metadata persisted with an order.
///
/// Fulfillment and reconciliation read these values instead of recomputing
/// the decision, so they must reflect what the customer saw at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStoreMetadata {
    pub order_id: OrderId,
    pub store_final: StoreId,
    pub effective_store_final: StoreId,
    pub is_future_date: bool,
    pub stripe_account: String,
    pub pagarme_account: String,
    pub shipping_method: ShippingMethod,
    /// Store the customer chose for pickup, if any.
    pub pickup_store: Option<StoreId>,
    /// Fulfillment id of `store_final`, recorded only alongside `pickup_store`.
    pub pickup_store_id: Option<String>,
}

impl OrderStoreMetadata {
    /// Derive the metadata from the session state at order creation.
    ///
    /// A pickup order with a chosen store is pinned to that store for both
    /// the candidate and the effective store. Everything else is taken from
    /// the session as the decision left it.
    #[must_use]
    pub fn from_checkout(
        order_id: OrderId,
        state: &CheckoutState,
        pickup_store: Option<StoreId>,
        registry: &StoreRegistry,
    ) -> Self {
        let (store_final, effective_store_final) = match (state.shipping_method, pickup_store) {
            (ShippingMethod::Pickup, Some(store)) => (store, store),
            _ => (state.store_final, state.effective_store_final),
        };

        Self {
            order_id,
            store_final,
            effective_store_final,
            is_future_date: state.is_future_date,
            stripe_account: state.payment_accounts.stripe.clone(),
            pagarme_account: state.payment_accounts.pagarme.clone(),
            shipping_method: state.shipping_method,
            pickup_store,
            pickup_store_id: pickup_store
                .map(|_| registry.fulfillment_id(store_final).to_owned()),
        }
    }

    /// `yes`/`no` flag as stored in order meta.
    #[must_use]
    pub const fn is_future_date_flag(&self) -> &'static str {
        if self.is_future_date { "yes" } else { "no" }
    }

    /// Order meta entries as key/value pairs, in write order.
    #[must_use]
    pub fn meta_entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = vec![
            ("_store_final", self.store_final.name().to_owned()),
            (
                "_effective_store_final",
                self.effective_store_final.name().to_owned(),
            ),
            ("_is_future_date", self.is_future_date_flag().to_owned()),
            ("_payment_account_stripe", self.stripe_account.clone()),
            ("_payment_account_pagarme", self.pagarme_account.clone()),
        ];
        if let (Some(store), Some(id)) = (self.pickup_store, &self.pickup_store_id) {
            entries.push(("_shipping_pickup_stores", store.name().to_owned()));
            entries.push(("_shipping_pickup_store_id", id.clone()));
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentAccounts;

    fn delivery_state() -> CheckoutState {
        CheckoutState {
            store_final: StoreId::Barreiro,
            effective_store_final: StoreId::Central,
            available_payment_methods: Vec::new(),
            is_future_date: false,
            payment_accounts: PaymentAccounts::new("stripe", "central"),
            shipping_method: ShippingMethod::Delivery,
        }
    }

    #[test]
    fn test_delivery_order_keeps_session_stores() {
        let registry = StoreRegistry::default();
        let meta =
            OrderStoreMetadata::from_checkout(OrderId::new(1), &delivery_state(), None, &registry);

        assert_eq!(meta.store_final, StoreId::Barreiro);
        assert_eq!(meta.effective_store_final, StoreId::Central);
        assert_eq!(meta.stripe_account, "stripe");
        assert_eq!(meta.pickup_store_id, None);
        assert_eq!(meta.meta_entries().len(), 5);
    }

    #[test]
    fn test_pickup_order_is_pinned_to_chosen_store() {
        let registry = StoreRegistry::default();
        let state = CheckoutState {
            shipping_method: ShippingMethod::Pickup,
            ..delivery_state()
        };
        let meta =
            OrderStoreMetadata::from_checkout(OrderId::new(2), &state, Some(StoreId::Sion), &registry);

        assert_eq!(meta.store_final, StoreId::Sion);
        assert_eq!(meta.effective_store_final, StoreId::Sion);
        assert_eq!(meta.pickup_store_id.as_deref(), Some("127163"));

        let entries = meta.meta_entries();
        assert!(entries.contains(&("_shipping_pickup_stores", "Unidade Sion".to_string())));
        assert!(entries.contains(&("_shipping_pickup_store_id", "127163".to_string())));
    }

    #[test]
    fn test_future_flag_is_yes_no() {
        let registry = StoreRegistry::default();
        let state = CheckoutState {
            is_future_date: true,
            ..delivery_state()
        };
        let meta = OrderStoreMetadata::from_checkout(OrderId::new(3), &state, None, &registry);
        assert_eq!(meta.is_future_date_flag(), "yes");
    }
}
