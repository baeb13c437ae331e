//! Session-related types.
//!
//! Keys under which the checkout state is stored in the customer session.

/// Session keys for the checkout projection of a store decision.
pub mod keys {
    /// Candidate store, before the critical-window override.
    pub const CHECKOUT_STORE_FINAL: &str = "checkout_store_final";

    /// Store after future-date and critical-window rules.
    pub const EFFECTIVE_STORE_FINAL: &str = "effective_store_final";

    /// Payment methods allowed by the last decision.
    pub const AVAILABLE_PAYMENT_METHODS: &str = "available_payment_methods";

    /// Whether the order is scheduled for a later day.
    pub const IS_FUTURE_DATE: &str = "is_future_date";

    /// Settlement accounts of the effective store.
    pub const PAYMENT_ACCOUNTS: &str = "payment_accounts";

    /// Pickup or delivery.
    pub const SHIPPING_METHOD: &str = "shipping_method";
}
