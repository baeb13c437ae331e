//! Checkout session extractor.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::checkout::SessionCheckoutStore;
use crate::error::AppError;

/// The customer's session, as a checkout state store.
///
/// Rejects with `dependency_unavailable` when the session layer is not
/// installed; the decision cannot be projected without it.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CheckoutSession(store): CheckoutSession) -> impl IntoResponse {
///     let state = store.load().await?;
/// }
/// ```
pub struct CheckoutSession(pub SessionCheckoutStore);

impl<S> FromRequestParts<S> for CheckoutSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(|session| Self(SessionCheckoutStore::new(session)))
            .ok_or_else(|| AppError::DependencyUnavailable("session layer not installed".into()))
    }
}
