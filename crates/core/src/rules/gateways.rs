//! Checkout gateway filtering.

use super::StoreRegistry;
use crate::types::{MULTISTORE_GATEWAY_ID, PaymentMethod, StoreId};

/// Filter the gateways a checkout page is about to render.
///
/// When `allowed` is non-empty only gateways listed there survive, plus the
/// multistore card gateway. Per-store card gateways that do not belong to the
/// effective store are then removed so the customer only ever sees the card
/// account the order will settle into. Input order is kept.
#[must_use]
pub fn filter_gateways(
    gateways: &[String],
    allowed: &[PaymentMethod],
    effective_store: StoreId,
    registry: &StoreRegistry,
) -> Vec<String> {
    let card_ids = registry.card_gateway_ids();
    let accounts = registry.accounts_for(effective_store);

    gateways
        .iter()
        .filter(|id| {
            allowed.is_empty()
                || id.as_str() == MULTISTORE_GATEWAY_ID
                || allowed.iter().any(|method| &method.id == *id)
        })
        .filter(|id| !card_ids.contains(id.as_str()) || **id == accounts.stripe)
        .cloned()
        .collect()
}
