//! Store decision endpoint.

use axum::{Json, extract::State};
use store_decision_core::DecisionResponse;
use tracing::instrument;

use crate::decision::{DecisionLog, DecisionRequest};
use crate::error::Result;
use crate::middleware::{CheckoutSession, RequestId};
use crate::models::DecisionPayload;
use crate::state::AppState;

/// Decide the store for a checkout and project it into the session.
///
/// Answers 200 with the decision (or the Central fallback) whenever a CEP is
/// present; 400 `no_cep` otherwise.
#[instrument(skip_all)]
pub async fn store_decision(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    CheckoutSession(store): CheckoutSession,
    Json(payload): Json<DecisionPayload>,
) -> Result<Json<DecisionResponse>> {
    let request = DecisionRequest::try_from(payload)?;
    let log = DecisionLog::new(request_id, "store-decision");

    let decision = state.engine().decide(&request, &store, &log).await;
    Ok(Json(decision.response()))
}
