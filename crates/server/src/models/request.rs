//! Request bodies accepted by the HTTP routes.

use serde::{Deserialize, Serialize};
use store_decision_core::{Cep, CepError, ShippingMethod, StoreId};

use crate::decision::DecisionRequest;

/// JSON body of the store decision endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DecisionPayload {
    pub cep: Option<String>,
    /// `pickup` or `delivery` (default).
    pub shipping_method: Option<String>,
    pub pickup_store: Option<String>,
    pub delivery_date: Option<String>,
    pub pickup_date: Option<String>,
}

impl TryFrom<DecisionPayload> for DecisionRequest {
    type Error = CepError;

    fn try_from(payload: DecisionPayload) -> Result<Self, Self::Error> {
        Self::new(
            payload.cep.as_deref().unwrap_or_default(),
            ShippingMethod::from_request(payload.shipping_method.as_deref()),
            payload.pickup_store.as_deref(),
            payload.delivery_date.as_deref(),
            payload.pickup_date.as_deref(),
        )
    }
}

/// Checkout form posted when the order review is refreshed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderReviewForm {
    /// Chosen shipping rate, e.g. `local_pickup:3` or `flat_rate:1`.
    #[serde(rename = "shipping_method[0]")]
    pub shipping_method: Option<String>,
    pub shipping_pickup_stores: Option<String>,
    pub delivery_date: Option<String>,
    pub pickup_date: Option<String>,
    pub billing_postcode: Option<String>,
    pub shipping_postcode: Option<String>,
}

impl OrderReviewForm {
    #[must_use]
    pub fn shipping_method(&self) -> ShippingMethod {
        self.shipping_method
            .as_deref()
            .map_or(ShippingMethod::Delivery, ShippingMethod::from_rate_id)
    }

    /// Billing postcode first, then shipping.
    #[must_use]
    pub fn cep(&self) -> Option<Cep> {
        Cep::first_of([
            self.billing_postcode.as_deref(),
            self.shipping_postcode.as_deref(),
        ])
    }
}

impl TryFrom<OrderReviewForm> for DecisionRequest {
    type Error = CepError;

    fn try_from(form: OrderReviewForm) -> Result<Self, Self::Error> {
        let cep = form.cep().ok_or(CepError::Empty)?;
        Self::new(
            cep.as_str(),
            form.shipping_method(),
            form.shipping_pickup_stores.as_deref(),
            form.delivery_date.as_deref(),
            form.pickup_date.as_deref(),
        )
    }
}

/// JSON body of the gateway filter endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewayFilterPayload {
    /// Gateway ids the commerce runtime is about to list.
    pub gateways: Vec<String>,
    /// Chosen shipping rate id; the session's method when absent.
    pub shipping_method: Option<String>,
    pub billing_postcode: Option<String>,
    pub shipping_postcode: Option<String>,
    pub delivery_date: Option<String>,
    pub pickup_date: Option<String>,
}

impl GatewayFilterPayload {
    #[must_use]
    pub fn cep(&self) -> Option<Cep> {
        Cep::first_of([
            self.billing_postcode.as_deref(),
            self.shipping_postcode.as_deref(),
        ])
    }

    /// Delivery date, else pickup date.
    #[must_use]
    pub fn scheduled_date(&self) -> Option<&str> {
        [&self.delivery_date, &self.pickup_date]
            .into_iter()
            .filter_map(Option::as_deref)
            .find(|value| !value.trim().is_empty())
    }
}

/// Response of the gateway filter endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayFilterResponse {
    pub gateways: Vec<String>,
    pub effective_store_final: StoreId,
}

/// JSON body of the order metadata endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderMetadataPayload {
    /// Pickup store posted with the checkout form.
    pub shipping_pickup_stores: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_payload_defaults_to_delivery() {
        let payload: DecisionPayload =
            serde_json::from_str(r#"{"cep": "30140-000", "pickup_store": "Unidade Sion"}"#)
                .unwrap();
        let request = DecisionRequest::try_from(payload).unwrap();
        assert_eq!(request.shipping_method, ShippingMethod::Delivery);
        assert_eq!(request.pickup_store, None);
    }

    #[test]
    fn test_decision_payload_without_cep() {
        let payload: DecisionPayload = serde_json::from_str("{}").unwrap();
        assert_eq!(DecisionRequest::try_from(payload), Err(CepError::Empty));
    }

    #[test]
    fn test_order_review_form_reads_rate_id_and_postcodes() {
        let form = OrderReviewForm {
            shipping_method: Some("local_pickup:3".to_string()),
            shipping_pickup_stores: Some("Unidade Barreiro".to_string()),
            billing_postcode: Some(String::new()),
            shipping_postcode: Some("30640-010".to_string()),
            ..OrderReviewForm::default()
        };
        assert_eq!(form.shipping_method(), ShippingMethod::Pickup);

        let request = DecisionRequest::try_from(form).unwrap();
        assert_eq!(request.cep.as_str(), "30640010");
        assert_eq!(request.pickup_store.as_deref(), Some("Unidade Barreiro"));
    }

    #[test]
    fn test_gateway_payload_scheduled_date() {
        let payload = GatewayFilterPayload {
            delivery_date: Some(" ".to_string()),
            pickup_date: Some("2026-10-21".to_string()),
            ..GatewayFilterPayload::default()
        };
        assert_eq!(payload.scheduled_date(), Some("2026-10-21"));
        assert_eq!(payload.cep(), None);
    }
}
