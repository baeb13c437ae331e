//! Store decision orchestration.
//!
//! [`DecisionEngine`] composes the pure rules from `store_decision_core`
//! with the zone matcher and the clock. The zone lookup is the only awaited
//! I/O and is bounded by a timeout; everything else is synchronous.

mod clock;
mod log;
mod request;

use std::sync::Arc;
use std::time::Duration;

use store_decision_core::{
    Cep, CutoffSchedule, PaymentRules, ShippingMethod, StoreDecision, StoreId, StoreIdError,
    StoreRegistry, ZoneId, classify, effective_store, normalize_titles, reconcile,
};
use thiserror::Error;

pub use clock::{Clock, FixedClock, SystemClock};
pub use log::DecisionLog;
pub use request::DecisionRequest;

use crate::checkout::{CheckoutStateStore, ProjectionError};
use crate::zones::{ZoneLookupError, ZoneMatcher};

/// Default upper bound on a zone lookup.
pub const DEFAULT_ZONE_TIMEOUT: Duration = Duration::from_secs(3);

/// Failures that replace a decision with the Central fallback.
#[derive(Debug, Error)]
pub enum DecisionError {
    #[error("pickup store not recognised: {0}")]
    UnknownPickupStore(#[from] StoreIdError),

    #[error("failed to project decision: {0}")]
    Projection(#[from] ProjectionError),
}

/// Store re-derived for a checkout refresh that is not a full decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveStore {
    pub store_final: StoreId,
    pub effective_store_final: StoreId,
    pub is_future_date: bool,
}

/// The store decision engine.
///
/// Holds only immutable configuration and shared collaborators, so one
/// instance serves every request.
pub struct DecisionEngine {
    registry: Arc<StoreRegistry>,
    schedule: CutoffSchedule,
    payment_rules: PaymentRules,
    zones: Arc<dyn ZoneMatcher>,
    clock: Arc<dyn Clock>,
    zone_timeout: Duration,
}

impl DecisionEngine {
    /// Create an engine for the production store network.
    #[must_use]
    pub fn new(zones: Arc<dyn ZoneMatcher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            registry: Arc::new(StoreRegistry::default()),
            schedule: CutoffSchedule::default(),
            payment_rules: PaymentRules::default(),
            zones,
            clock,
            zone_timeout: DEFAULT_ZONE_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_registry(mut self, registry: StoreRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    #[must_use]
    pub fn with_schedule(mut self, schedule: CutoffSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    #[must_use]
    pub fn with_payment_rules(mut self, rules: PaymentRules) -> Self {
        self.payment_rules = rules;
        self
    }

    #[must_use]
    pub const fn with_zone_timeout(mut self, timeout: Duration) -> Self {
        self.zone_timeout = timeout;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &StoreRegistry {
        &self.registry
    }

    /// Match the CEP to a zone.
    ///
    /// Failures and timeouts are logged and read as "no zone".
    pub async fn lookup_zone(&self, cep: &Cep, log: &DecisionLog) -> Option<ZoneId> {
        match tokio::time::timeout(self.zone_timeout, self.zones.match_zone(cep)).await {
            Ok(Ok(zone)) => zone,
            Ok(Err(err)) => {
                log.zone_lookup_failed(cep, &err);
                None
            }
            Err(_) => {
                log.zone_lookup_failed(cep, &ZoneLookupError::Timeout(self.zone_timeout));
                None
            }
        }
    }

    /// Compute a decision without touching checkout state.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionError::UnknownPickupStore`] when the chosen pickup
    /// store is not one of ours.
    pub async fn compute(
        &self,
        request: &DecisionRequest,
        log: &DecisionLog,
    ) -> Result<StoreDecision, DecisionError> {
        let (store_final, zone_id) = match &request.pickup_store {
            Some(raw) => (StoreId::parse(raw)?, None),
            None => {
                let zone = self.lookup_zone(&request.cep, log).await;
                (self.registry.store_for_zone(zone), zone)
            }
        };

        let flags = classify(
            self.clock.now(),
            request.scheduled_date.as_deref(),
            &self.schedule,
        );
        if let Some(err) = &flags.date_error {
            log.date_unparseable(err);
        }

        let effective_store_final =
            effective_store(store_final, flags.is_future_date, flags.force_central);
        let payments = reconcile(
            &self.registry,
            &self.payment_rules,
            effective_store_final,
            request.shipping_method,
            flags.weekday,
        );

        let decision = StoreDecision {
            cep: request.cep.clone(),
            shipping_method: request.shipping_method,
            scheduled_date: flags.scheduled_date,
            is_future_date: flags.is_future_date,
            zone_id,
            store_final,
            force_central: flags.force_central,
            effective_store_final,
            payment_methods: payments.methods,
            payment_accounts: payments.accounts,
            pickup_store_id: self.registry.fulfillment_id(store_final).to_owned(),
            fallback: false,
        };
        log.decided(&decision, flags.weekday);
        Ok(decision)
    }

    /// The Central-pinned safety decision.
    ///
    /// Full catalog, Central accounts, never future-dated.
    #[must_use]
    pub fn fallback(&self, request: &DecisionRequest) -> StoreDecision {
        StoreDecision {
            cep: request.cep.clone(),
            shipping_method: request.shipping_method,
            scheduled_date: None,
            is_future_date: false,
            zone_id: None,
            store_final: StoreId::Central,
            force_central: false,
            effective_store_final: StoreId::Central,
            payment_methods: normalize_titles(self.registry.catalog().to_vec()),
            payment_accounts: self.registry.accounts_for(StoreId::Central),
            pickup_store_id: self.registry.fulfillment_id(StoreId::Central).to_owned(),
            fallback: true,
        }
    }

    /// Decide and project the decision into checkout state.
    ///
    /// Never fails: any error after validation is logged and answered with
    /// the [fallback](Self::fallback), which is projected in turn.
    pub async fn decide<S>(
        &self,
        request: &DecisionRequest,
        store: &S,
        log: &DecisionLog,
    ) -> StoreDecision
    where
        S: CheckoutStateStore + ?Sized,
    {
        let result = match self.compute(request, log).await {
            Ok(decision) => store
                .save(&decision.checkout_state())
                .await
                .map(|()| decision)
                .map_err(DecisionError::from),
            Err(err) => Err(err),
        };

        match result {
            Ok(decision) => decision,
            Err(err) => {
                log.fallback(&err);
                let fallback = self.fallback(request);
                if let Err(err) = store.save(&fallback.checkout_state()).await {
                    log.projection_failed(&err);
                }
                fallback
            }
        }
    }

    /// Re-derive the effective store for a checkout refresh.
    ///
    /// Delivery orders with a CEP go back through zone matching; otherwise
    /// the candidate store already in the session stands. The same pure
    /// rules as [`compute`](Self::compute) then apply.
    pub async fn recompute_effective_store(
        &self,
        shipping_method: ShippingMethod,
        cep: Option<&Cep>,
        session_store: StoreId,
        scheduled_date: Option<&str>,
        log: &DecisionLog,
    ) -> EffectiveStore {
        let store_final = match (shipping_method, cep) {
            (ShippingMethod::Delivery, Some(cep)) => {
                let zone = self.lookup_zone(cep, log).await;
                self.registry.store_for_zone(zone)
            }
            _ => session_store,
        };

        let flags = classify(self.clock.now(), scheduled_date, &self.schedule);
        if let Some(err) = &flags.date_error {
            log.date_unparseable(err);
        }

        EffectiveStore {
            store_final,
            effective_store_final: effective_store(
                store_final,
                flags.is_future_date,
                flags.force_central,
            ),
            is_future_date: flags.is_future_date,
        }
    }
}
