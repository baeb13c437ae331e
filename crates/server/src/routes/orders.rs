//! Order metadata endpoints.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use store_decision_core::{CheckoutState, OrderId, OrderStoreMetadata, StoreId};
use tracing::{info, instrument, warn};

use crate::checkout::CheckoutStateStore;
use crate::error::{AppError, Result};
use crate::middleware::CheckoutSession;
use crate::models::OrderMetadataPayload;
use crate::state::AppState;

/// Order metadata as returned to the commerce runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderMetadataResponse {
    pub order_id: OrderId,
    /// Order meta keys and values.
    pub meta: BTreeMap<String, String>,
}

impl From<&OrderStoreMetadata> for OrderMetadataResponse {
    fn from(metadata: &OrderStoreMetadata) -> Self {
        Self {
            order_id: metadata.order_id,
            meta: metadata
                .meta_entries()
                .into_iter()
                .map(|(key, value)| (key.to_owned(), value))
                .collect(),
        }
    }
}

/// Record the routing metadata of a newly created order.
///
/// Values come from the session as the last decision left it. A posted
/// pickup store is always recorded; a pickup order is also pinned to it.
#[instrument(skip_all, fields(order_id = %order_id))]
pub async fn record(
    State(state): State<AppState>,
    CheckoutSession(store): CheckoutSession,
    Path(order_id): Path<OrderId>,
    Json(payload): Json<OrderMetadataPayload>,
) -> Result<(StatusCode, Json<OrderMetadataResponse>)> {
    let checkout = store.load().await.unwrap_or_else(|err| {
        warn!(error = %err, "Checkout state unreadable, recording defaults");
        CheckoutState::default()
    });

    let pickup_store = payload
        .shipping_pickup_stores
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(StoreId::parse)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let metadata = OrderStoreMetadata::from_checkout(
        order_id,
        &checkout,
        pickup_store,
        state.engine().registry(),
    );
    state.orders().upsert(&metadata).await?;

    info!(
        store_final = %metadata.store_final,
        effective_store_final = %metadata.effective_store_final,
        is_future_date = metadata.is_future_date_flag(),
        "Order store metadata recorded"
    );

    Ok((StatusCode::CREATED, Json(OrderMetadataResponse::from(&metadata))))
}

/// Routing metadata recorded for an order.
pub async fn show(
    State(state): State<AppState>,
    Path(order_id): Path<OrderId>,
) -> Result<Json<OrderMetadataResponse>> {
    let metadata = state
        .orders()
        .get(order_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {order_id}")))?;

    Ok(Json(OrderMetadataResponse::from(&metadata)))
}
