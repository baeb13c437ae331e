//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                                  - Liveness check
//! GET  /health/ready                            - Readiness check (database)
//!
//! # Store decision
//! POST /wp-json/custom/v1/store-decision        - Decide store (JSON)
//! POST /api/store-decision                      - Same, unprefixed
//!
//! # Checkout hooks
//! POST /checkout/update-order-review            - Re-decide on review refresh (form)
//! POST /api/checkout/gateways                   - Filter payment gateways
//! GET  /api/checkout/effective-store            - Effective store in the session
//!
//! # Orders
//! POST /api/orders/{order_id}/store-metadata    - Record order routing metadata
//! GET  /api/orders/{order_id}/store-metadata    - Read it back
//! ```

pub mod checkout;
pub mod decision;
pub mod health;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the checkout hook routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/gateways", post(checkout::gateways))
        .route("/effective-store", get(checkout::effective_store))
}

/// Build the complete router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route(
            "/wp-json/custom/v1/store-decision",
            post(decision::store_decision),
        )
        .route("/api/store-decision", post(decision::store_decision))
        .route(
            "/checkout/update-order-review",
            post(checkout::update_order_review),
        )
        .nest("/api/checkout", checkout_routes())
        .route(
            "/api/orders/{order_id}/store-metadata",
            post(orders::record).get(orders::show),
        )
}
