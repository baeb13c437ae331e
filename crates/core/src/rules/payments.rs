//! Payment reconciliation for the effective store.

use chrono::Weekday;

use super::StoreRegistry;
use crate::types::{
    CARD_GATEWAY_TITLE, PaymentAccounts, PaymentMethod, ShippingMethod, StoreId,
};

/// Optional restrictions on the payment catalog.
///
/// The weekday whitelist limits same-store delivery orders placed Monday to
/// Thursday to online payment. It is kept switched off until the stores ask
/// for it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRules {
    /// Enables the weekday whitelist.
    pub weekday_restriction: bool,
    /// Gateway ids allowed while the whitelist applies.
    pub weekday_whitelist: Vec<String>,
    /// Days on which the whitelist applies.
    pub restricted_weekdays: Vec<Weekday>,
}

impl PaymentRules {
    /// Rules with the weekday whitelist toggled.
    #[must_use]
    pub fn with_weekday_restriction(enabled: bool) -> Self {
        Self {
            weekday_restriction: enabled,
            ..Self::default()
        }
    }

    fn restricts(&self, store: StoreId, shipping: ShippingMethod, weekday: Weekday) -> bool {
        self.weekday_restriction
            && shipping == ShippingMethod::Delivery
            && store.is_physical()
            && self.restricted_weekdays.contains(&weekday)
    }
}

impl Default for PaymentRules {
    fn default() -> Self {
        Self {
            weekday_restriction: false,
            weekday_whitelist: vec!["stripe".to_string(), "pagarme_custom_pix".to_string()],
            restricted_weekdays: vec![Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu],
        }
    }
}

/// Payment methods and accounts for one effective store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub methods: Vec<PaymentMethod>,
    pub accounts: PaymentAccounts,
}

/// Resolve the payment methods and settlement accounts of a store.
#[must_use]
pub fn reconcile(
    registry: &StoreRegistry,
    rules: &PaymentRules,
    effective_store: StoreId,
    shipping: ShippingMethod,
    weekday: Weekday,
) -> Reconciliation {
    let mut methods = registry.catalog().to_vec();

    if rules.restricts(effective_store, shipping, weekday) {
        methods.retain(|method| rules.weekday_whitelist.contains(&method.id));
    }

    Reconciliation {
        methods: normalize_titles(methods),
        accounts: registry.accounts_for(effective_store),
    }
}

/// Give the generic card gateway its canonical title.
#[must_use]
pub fn normalize_titles(mut methods: Vec<PaymentMethod>) -> Vec<PaymentMethod> {
    for method in methods.iter_mut().filter(|m| m.is_card_gateway()) {
        method.title = CARD_GATEWAY_TITLE.to_owned();
    }
    methods
}
