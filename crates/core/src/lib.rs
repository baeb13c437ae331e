//! Store Decision Core - routing rules and shared types.
//!
//! This crate decides which fulfillment store serves a checkout and which
//! payment methods and settlement accounts apply to it. It is used by:
//! - `server` - The HTTP service exposing the decision endpoint and checkout hooks
//! - `cli` - Offline evaluation and database migrations
//!
//! # Architecture
//!
//! The core crate contains only types and pure rules - no I/O, no sessions,
//! no HTTP clients. Zone matching and session storage are collaborators that
//! live in the server crate and feed plain values into these rules.
//!
//! # Modules
//!
//! - [`types`] - Store identities, postal codes, payment entries, decisions
//! - [`rules`] - Registry, cutoff schedule, temporal classifier, effective
//!   store resolution, payment reconciliation and gateway filtering

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod rules;
pub mod types;

pub use rules::*;
pub use types::*;
