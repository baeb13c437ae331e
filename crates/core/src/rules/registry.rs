//! Static store configuration: fulfillment ids, zone assignment, accounts
//! and the payment catalog.

use std::collections::{BTreeSet, HashMap};

use crate::types::{PaymentAccounts, PaymentMethod, StoreId, ZoneId};

/// Store and zone registry.
///
/// Built once at startup and shared read-only. Zone assignment is a
/// membership test against per-store sets, checked in registration order;
/// a zone in no set, or no zone at all, belongs to Central.
#[derive(Debug, Clone)]
pub struct StoreRegistry {
    fulfillment_ids: HashMap<StoreId, String>,
    zone_sets: Vec<(StoreId, BTreeSet<ZoneId>)>,
    accounts: HashMap<StoreId, PaymentAccounts>,
    catalog: Vec<PaymentMethod>,
}

impl StoreRegistry {
    /// Create an empty registry with the given payment catalog.
    #[must_use]
    pub fn new(catalog: Vec<PaymentMethod>) -> Self {
        Self {
            fulfillment_ids: HashMap::new(),
            zone_sets: Vec::new(),
            accounts: HashMap::new(),
            catalog,
        }
    }

    /// Register a store's fulfillment id.
    #[must_use]
    pub fn with_fulfillment_id(mut self, store: StoreId, id: impl Into<String>) -> Self {
        self.fulfillment_ids.insert(store, id.into());
        self
    }

    /// Register the zones served by a physical store.
    ///
    /// Sets are checked in the order they were registered. Zones registered
    /// for Central are ignored since Central is already the default.
    #[must_use]
    pub fn with_zones(mut self, store: StoreId, zones: impl IntoIterator<Item = i32>) -> Self {
        if store.is_physical() {
            let set = zones.into_iter().map(ZoneId::new).collect();
            self.zone_sets.retain(|(existing, _)| *existing != store);
            self.zone_sets.push((store, set));
        }
        self
    }

    /// Register a store's settlement accounts.
    #[must_use]
    pub fn with_accounts(mut self, store: StoreId, accounts: PaymentAccounts) -> Self {
        self.accounts.insert(store, accounts);
        self
    }

    /// Candidate store for a matched zone.
    #[must_use]
    pub fn store_for_zone(&self, zone: Option<ZoneId>) -> StoreId {
        zone.and_then(|zone| {
            self.zone_sets
                .iter()
                .find(|(_, set)| set.contains(&zone))
                .map(|(store, _)| *store)
        })
        .unwrap_or(StoreId::Central)
    }

    /// Zones assigned to a store, in ascending order.
    #[cfg(test)]
    fn zones_of(&self, store: StoreId) -> impl Iterator<Item = ZoneId> + '_ {
        self.zone_sets
            .iter()
            .filter(move |(owner, _)| *owner == store)
            .flat_map(|(_, set)| set.iter().copied())
    }

    /// External fulfillment id of a store, Central's when unregistered.
    #[must_use]
    pub fn fulfillment_id(&self, store: StoreId) -> &str {
        self.fulfillment_ids
            .get(&store)
            .or_else(|| self.fulfillment_ids.get(&StoreId::Central))
            .map_or("", String::as_str)
    }

    /// Settlement accounts of a store.
    ///
    /// A store without an entry settles into Central's accounts; without a
    /// Central entry either, into the unassigned pair. Never undefined.
    #[must_use]
    pub fn accounts_for(&self, store: StoreId) -> PaymentAccounts {
        self.accounts
            .get(&store)
            .or_else(|| self.accounts.get(&StoreId::Central))
            .cloned()
            .unwrap_or_else(PaymentAccounts::unassigned)
    }

    /// Gateway ids of every per-store card account.
    #[must_use]
    pub fn card_gateway_ids(&self) -> BTreeSet<&str> {
        self.accounts
            .values()
            .map(|accounts| accounts.stripe.as_str())
            .collect()
    }

    /// The full payment catalog.
    #[must_use]
    pub fn catalog(&self) -> &[PaymentMethod] {
        &self.catalog
    }
}

impl Default for StoreRegistry {
    /// The production store network.
    fn default() -> Self {
        Self::new(default_catalog())
            .with_fulfillment_id(StoreId::Barreiro, "110727")
            .with_fulfillment_id(StoreId::Sion, "127163")
            .with_fulfillment_id(StoreId::Central, "86261")
            .with_zones(
                StoreId::Barreiro,
                [
                    24, 11, 13, 107, 10, 20, 132, 25, 59, 60, 131, 64, 66, 50, 31, 39, 133, 134,
                    135, 136,
                ],
            )
            .with_zones(
                StoreId::Sion,
                [
                    114, 137, 12, 123, 124, 103, 101, 104, 21, 138, 139, 140, 141, 142, 143, 144,
                ],
            )
            .with_accounts(StoreId::Central, PaymentAccounts::new("stripe", "central"))
            .with_accounts(
                StoreId::Barreiro,
                PaymentAccounts::new("stripe_cc", "barreiro"),
            )
            .with_accounts(StoreId::Sion, PaymentAccounts::new("eh_stripe_pay", "sion"))
    }
}

/// Payment methods offered by every store.
#[must_use]
pub fn default_catalog() -> Vec<PaymentMethod> {
    vec![
        // card gateway, one instance per store account
        PaymentMethod::new("stripe", "Cartão de Crédito On-line"),
        PaymentMethod::new("stripe_cc", "Cartão de Crédito On-line"),
        PaymentMethod::new("eh_stripe_pay", "Cartão de Crédito On-line"),
        PaymentMethod::new("pagarme_custom_pix", "Pix"),
        PaymentMethod::new("custom_729b8aa9fc227ff", "Cartão na Entrega"),
        PaymentMethod::new("woo_payment_on_delivery", "Dinheiro na Entrega"),
        PaymentMethod::new("custom_e876f567c151864", "Vale Alimentação"),
    ]
}
