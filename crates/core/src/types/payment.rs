//! Payment catalog entries and settlement accounts.

use serde::{Deserialize, Serialize};

/// Gateway id of the generic card gateway.
pub const CARD_GATEWAY_ID: &str = "stripe";

/// Display title the generic card gateway must always carry.
pub const CARD_GATEWAY_TITLE: &str = "Cartão de Crédito On-line";

/// Gateway id of the multi-store card gateway instance.
///
/// It routes to the right account by itself, so it is never filtered out.
pub const MULTISTORE_GATEWAY_ID: &str = "stripe_multistore";

/// A payment method offered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Gateway id in the commerce runtime.
    pub id: String,
    /// Title shown to the customer.
    pub title: String,
}

impl PaymentMethod {
    /// Create a catalog entry.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }

    /// Whether this is the generic card gateway.
    #[must_use]
    pub fn is_card_gateway(&self) -> bool {
        self.id == CARD_GATEWAY_ID
    }
}

/// Settlement sub-accounts of one store, one per payment provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentAccounts {
    /// Stripe gateway id that settles into the store's account.
    pub stripe: String,
    /// Pagar.me recipient key.
    pub pagarme: String,
}

impl PaymentAccounts {
    /// Create an account pair.
    #[must_use]
    pub fn new(stripe: impl Into<String>, pagarme: impl Into<String>) -> Self {
        Self {
            stripe: stripe.into(),
            pagarme: pagarme.into(),
        }
    }

    /// Last-resort pair used when no table entry exists, not even Central's.
    #[must_use]
    pub fn unassigned() -> Self {
        Self::new("central", "central")
    }
}

impl Default for PaymentAccounts {
    fn default() -> Self {
        Self::unassigned()
    }
}
