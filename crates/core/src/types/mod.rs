//! Core types for the store decision engine.
//!
//! This module provides type-safe wrappers for the checkout routing domain.

pub mod cep;
pub mod checkout;
pub mod decision;
pub mod id;
pub mod order;
pub mod payment;
pub mod shipping;
pub mod store;
pub mod time;

pub use cep::{Cep, CepError};
pub use checkout::{CheckoutState, CheckoutStateParts};
pub use decision::{DecisionResponse, StoreDecision};
pub use id::*;
pub use order::OrderStoreMetadata;
pub use payment::{
    CARD_GATEWAY_ID, CARD_GATEWAY_TITLE, MULTISTORE_GATEWAY_ID, PaymentAccounts, PaymentMethod,
};
pub use shipping::ShippingMethod;
pub use store::{StoreId, StoreIdError};
pub use time::{HourMinute, HourMinuteError};
