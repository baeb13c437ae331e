//! Shipping method as seen by the store decision.

use core::fmt;

use serde::{Deserialize, Serialize};

/// How the customer receives the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMethod {
    /// Customer collects at a chosen store.
    Pickup,
    /// Store delivers to the customer's address.
    #[default]
    Delivery,
}

impl ShippingMethod {
    /// Interpret the free-form `shipping_method` field of a decision request.
    ///
    /// Only the exact value `pickup` selects pickup; anything else, including
    /// a missing field, is delivery.
    #[must_use]
    pub fn from_request(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("pickup") => Self::Pickup,
            _ => Self::Delivery,
        }
    }

    /// Interpret a commerce runtime shipping rate id such as `local_pickup:3`.
    ///
    /// The instance suffix after `:` is dropped; the method is pickup iff the
    /// remaining id mentions `pickup`.
    #[must_use]
    pub fn from_rate_id(rate_id: &str) -> Self {
        let method_id = rate_id.split(':').next().unwrap_or_default();
        if method_id.contains("pickup") {
            Self::Pickup
        } else {
            Self::Delivery
        }
    }

    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::Delivery => "delivery",
        }
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_request() {
        assert_eq!(ShippingMethod::from_request(Some("pickup")), ShippingMethod::Pickup);
        assert_eq!(ShippingMethod::from_request(Some("delivery")), ShippingMethod::Delivery);
        assert_eq!(ShippingMethod::from_request(Some("flat_rate")), ShippingMethod::Delivery);
        assert_eq!(ShippingMethod::from_request(None), ShippingMethod::Delivery);
    }

    #[test]
    fn test_from_rate_id() {
        assert_eq!(ShippingMethod::from_rate_id("local_pickup:3"), ShippingMethod::Pickup);
        assert_eq!(ShippingMethod::from_rate_id("pickup_location"), ShippingMethod::Pickup);
        assert_eq!(ShippingMethod::from_rate_id("flat_rate:7"), ShippingMethod::Delivery);
        assert_eq!(ShippingMethod::from_rate_id(""), ShippingMethod::Delivery);
    }
}
