//! Checkout state stored in the customer's `tower-sessions` session.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use store_decision_core::{CheckoutState, CheckoutStateParts, StoreId};
use tower_sessions::Session;
use tower_sessions::session::Error as SessionError;

use super::{CheckoutStateStore, ProjectionError};
use crate::models::session_keys as keys;

/// Read one key; a value that no longer decodes counts as absent.
async fn read<T: DeserializeOwned>(
    session: &Session,
    key: &str,
) -> Result<Option<T>, ProjectionError> {
    match session.get::<T>(key).await {
        Ok(value) => Ok(value),
        Err(SessionError::SerdeJson(err)) => {
            tracing::warn!(key, error = %err, "Discarding undecodable session value");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

async fn write<T: Serialize + Send + Sync>(
    session: &Session,
    key: &str,
    value: &T,
) -> Result<(), ProjectionError> {
    session.insert(key, value).await?;
    Ok(())
}

/// Checkout state kept in the customer's session.
///
/// Saves flush the session to its backend before returning, so a backend
/// failure surfaces here instead of in the session layer after the handler.
#[derive(Debug, Clone)]
pub struct SessionCheckoutStore {
    session: Session,
}

impl SessionCheckoutStore {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// The effective store of the last decision, if one was made.
    pub async fn effective_store_final(&self) -> Result<Option<StoreId>, ProjectionError> {
        read(&self.session, keys::EFFECTIVE_STORE_FINAL).await
    }

    /// Drop the unsaved changes so the session layer has nothing left to write.
    async fn discard(&self) {
        if let Err(err) = self.session.flush().await {
            tracing::warn!(error = %err, "Failed to discard unsaved checkout state");
        }
    }
}

#[async_trait]
impl CheckoutStateStore for SessionCheckoutStore {
    async fn load(&self) -> Result<CheckoutState, ProjectionError> {
        let session = &self.session;
        Ok(CheckoutState::from_parts(CheckoutStateParts {
            store_final: read(session, keys::CHECKOUT_STORE_FINAL).await?,
            effective_store_final: read(session, keys::EFFECTIVE_STORE_FINAL).await?,
            available_payment_methods: read(session, keys::AVAILABLE_PAYMENT_METHODS).await?,
            is_future_date: read(session, keys::IS_FUTURE_DATE).await?,
            payment_accounts: read(session, keys::PAYMENT_ACCOUNTS).await?,
            shipping_method: read(session, keys::SHIPPING_METHOD).await?,
        }))
    }

    async fn save(&self, state: &CheckoutState) -> Result<(), ProjectionError> {
        let session = &self.session;
        write(session, keys::CHECKOUT_STORE_FINAL, &state.store_final).await?;
        write(session, keys::EFFECTIVE_STORE_FINAL, &state.effective_store_final).await?;
        write(
            session,
            keys::AVAILABLE_PAYMENT_METHODS,
            &state.available_payment_methods,
        )
        .await?;
        write(session, keys::IS_FUTURE_DATE, &state.is_future_date).await?;
        write(session, keys::PAYMENT_ACCOUNTS, &state.payment_accounts).await?;
        write(session, keys::SHIPPING_METHOD, &state.shipping_method).await?;

        if let Err(err) = session.save().await {
            self.discard().await;
            return Err(err.into());
        }
        Ok(())
    }
}
