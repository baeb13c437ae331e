//! Validated decision input.

use store_decision_core::{Cep, CepError, ShippingMethod};

/// Input to one store decision.
///
/// The CEP is already validated; everything else is taken as posted and
/// interpreted by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRequest {
    pub cep: Cep,
    pub shipping_method: ShippingMethod,
    /// Store the customer chose for pickup. Only set for pickup orders.
    pub pickup_store: Option<String>,
    /// Delivery or pickup date as posted.
    pub scheduled_date: Option<String>,
}

impl DecisionRequest {
    /// Build a request from raw checkout fields.
    ///
    /// A pickup store is kept only for pickup orders. The delivery date wins
    /// over the pickup date when both are filled in.
    ///
    /// # Errors
    ///
    /// Returns [`CepError::Empty`] when the CEP has no digits.
    pub fn new(
        cep: &str,
        shipping_method: ShippingMethod,
        pickup_store: Option<&str>,
        delivery_date: Option<&str>,
        pickup_date: Option<&str>,
    ) -> Result<Self, CepError> {
        let non_empty = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
        };

        Ok(Self {
            cep: Cep::parse(cep)?,
            shipping_method,
            pickup_store: match shipping_method {
                ShippingMethod::Pickup => non_empty(pickup_store),
                ShippingMethod::Delivery => None,
            },
            scheduled_date: non_empty(delivery_date).or_else(|| non_empty(pickup_date)),
        })
    }
}
