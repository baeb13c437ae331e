//! Per-request decision logging context.

use chrono::Weekday;
use store_decision_core::{Cep, ScheduledDateError, StoreDecision};
use tracing::{error, info, warn};

use super::DecisionError;
use crate::checkout::ProjectionError;
use crate::zones::ZoneLookupError;

/// Correlates every event of one decision with its request.
///
/// Passed into each engine call so concurrent requests never share error
/// context.
#[derive(Debug, Clone)]
pub struct DecisionLog {
    request_id: String,
    endpoint: &'static str,
}

impl DecisionLog {
    #[must_use]
    pub fn new(request_id: impl Into<String>, endpoint: &'static str) -> Self {
        Self {
            request_id: request_id.into(),
            endpoint,
        }
    }

    pub(crate) fn zone_lookup_failed(&self, cep: &Cep, err: &ZoneLookupError) {
        warn!(
            request_id = %self.request_id,
            endpoint = self.endpoint,
            cep = %cep,
            error = %err,
            "Zone lookup failed, resolving to Central"
        );
    }

    pub(crate) fn date_unparseable(&self, err: &ScheduledDateError) {
        warn!(
            request_id = %self.request_id,
            endpoint = self.endpoint,
            error = %err,
            "Scheduled date not understood, treating order as same-day"
        );
    }

    pub(crate) fn decided(&self, decision: &StoreDecision, weekday: Weekday) {
        info!(
            request_id = %self.request_id,
            endpoint = self.endpoint,
            cep = %decision.cep,
            shipping_method = %decision.shipping_method,
            zone_id = ?decision.zone_id.map(|zone| zone.get()),
            store_final = %decision.store_final,
            effective_store_final = %decision.effective_store_final,
            is_future_date = decision.is_future_date,
            force_central = decision.force_central,
            weekday = %weekday,
            "Store decided"
        );
    }

    pub(crate) fn fallback(&self, err: &DecisionError) {
        error!(
            request_id = %self.request_id,
            endpoint = self.endpoint,
            error = %err,
            "Store decision failed, answering with the Central fallback"
        );
    }

    pub(crate) fn projection_failed(&self, err: &ProjectionError) {
        error!(
            request_id = %self.request_id,
            endpoint = self.endpoint,
            error = %err,
            "Checkout state unavailable"
        );
    }
}
