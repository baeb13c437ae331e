//! Store decision service.
//!
//! Decides which physical store fulfills a checkout, applies the critical
//! closing window and the future-date exemption, reconciles payment methods
//! and settlement accounts, and projects the result into the customer
//! session for the gateway filter and order-creation hooks.
//!
//! The HTTP surface lives in [`routes`]; the decision itself in
//! [`decision::DecisionEngine`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod checkout;
pub mod config;
pub mod db;
pub mod decision;
pub mod error;
pub mod middleware;
pub mod models;
pub mod orders;
pub mod routes;
pub mod state;
pub mod zones;
