//! Checkout hooks: order review refresh, gateway filtering and the
//! effective store lookup.

use axum::{Form, Json, extract::State};
use store_decision_core::{CheckoutState, DecisionResponse, ShippingMethod, filter_gateways};
use tracing::{instrument, warn};

use crate::checkout::CheckoutStateStore;
use crate::decision::{DecisionLog, DecisionRequest};
use crate::error::Result;
use crate::middleware::{CheckoutSession, RequestId};
use crate::models::{GatewayFilterPayload, GatewayFilterResponse, OrderReviewForm};
use crate::state::AppState;

/// Shown by the effective store lookup when no decision has been made in this session.
pub const UNKNOWN_STORE: &str = "(desconhecido)";

/// Re-run the decision when the checkout order review refreshes.
///
/// The shipping method comes from the selected rate id and the CEP from the
/// billing postcode, falling back to the shipping one.
#[instrument(skip_all)]
pub async fn update_order_review(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    CheckoutSession(store): CheckoutSession,
    Form(form): Form<OrderReviewForm>,
) -> Result<Json<DecisionResponse>> {
    let request = DecisionRequest::try_from(form)?;
    let log = DecisionLog::new(request_id, "update-order-review");

    let decision = state.engine().decide(&request, &store, &log).await;
    Ok(Json(decision.response()))
}

/// Filter the payment gateways about to be listed on the checkout page.
///
/// Re-derives the effective store from the posted fields, writes it back to
/// the session, then keeps only the gateways the decision allowed and the
/// card gateway of that store.
#[instrument(skip_all)]
pub async fn gateways(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    CheckoutSession(store): CheckoutSession,
    Json(payload): Json<GatewayFilterPayload>,
) -> Json<GatewayFilterResponse> {
    let log = DecisionLog::new(request_id, "checkout-gateways");
    let engine = state.engine();

    let mut checkout = match store.load().await {
        Ok(checkout) => checkout,
        Err(err) => {
            log.projection_failed(&err);
            CheckoutState::default()
        }
    };

    let shipping_method = payload
        .shipping_method
        .as_deref()
        .map_or(checkout.shipping_method, ShippingMethod::from_rate_id);
    let cep = payload.cep();

    let resolved = engine
        .recompute_effective_store(
            shipping_method,
            cep.as_ref(),
            checkout.store_final,
            payload.scheduled_date(),
            &log,
        )
        .await;

    checkout.effective_store_final = resolved.effective_store_final;
    checkout.is_future_date = resolved.is_future_date;
    if let Err(err) = store.save(&checkout).await {
        log.projection_failed(&err);
    }

    let gateways = filter_gateways(
        &payload.gateways,
        &checkout.available_payment_methods,
        resolved.effective_store_final,
        engine.registry(),
    );

    Json(GatewayFilterResponse {
        gateways,
        effective_store_final: resolved.effective_store_final,
    })
}

/// The effective store currently held in the session.
pub async fn effective_store(CheckoutSession(store): CheckoutSession) -> Json<String> {
    let effective = store.effective_store_final().await.unwrap_or_else(|err| {
        warn!(error = %err, "Checkout state unreadable");
        None
    });

    Json(effective.map_or_else(|| UNKNOWN_STORE.to_string(), |store| store.name().to_string()))
}
