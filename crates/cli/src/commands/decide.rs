//! Offline store decision.
//!
//! Runs the same engine as the service against an in-memory checkout, so a
//! decision can be reproduced from a CEP, a date and an instant.
//!
//! # Environment Variables
//!
//! - `STORE_UTC_OFFSET` - Store-local UTC offset (default: -03:00)
//! - `PAYMENT_WEEKDAY_RESTRICTION` - Enable the weekday payment whitelist

use std::path::PathBuf;
use std::sync::Arc;

use chrono::DateTime;
use store_decision_core::{CepError, PaymentRules, ShippingMethod, StoreDecision};
use store_decision_server::checkout::MemoryCheckoutStore;
use store_decision_server::config::{
    ConfigError, payment_weekday_restriction_from_env, store_offset_from_env,
};
use store_decision_server::decision::{
    Clock, DecisionEngine, DecisionLog, DecisionRequest, FixedClock, SystemClock,
};
use store_decision_server::zones::{NoZoneMatcher, PostcodeZoneTable, ZoneMatcher, ZoneTableError};
use thiserror::Error;
use tracing::info;

/// Errors preparing an offline decision.
#[derive(Debug, Error)]
pub enum DecideError {
    #[error("Invalid CEP: {0}")]
    Cep(#[from] CepError),

    #[error("Invalid --at instant: {0}")]
    Instant(#[from] chrono::ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Zone table error: {0}")]
    ZoneTable(#[from] ZoneTableError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Arguments of `sd-cli decide`.
#[derive(Debug, Clone)]
pub struct DecideArgs {
    pub cep: String,
    pub shipping_method: String,
    pub pickup_store: Option<String>,
    pub date: Option<String>,
    pub at: Option<String>,
    pub zone_table: Option<PathBuf>,
}

/// Compute the decision and print it as JSON on stdout.
///
/// # Errors
///
/// Returns an error if an argument is invalid or the zone table cannot be loaded.
pub async fn run(args: &DecideArgs) -> Result<(), DecideError> {
    let _ = dotenvy::dotenv();

    let offset = store_offset_from_env()?;
    let clock: Arc<dyn Clock> = match &args.at {
        Some(at) => Arc::new(FixedClock::at(&DateTime::parse_from_rfc3339(at)?, offset)),
        None => Arc::new(SystemClock::new(offset)),
    };

    let zones: Arc<dyn ZoneMatcher> = match &args.zone_table {
        Some(path) => {
            let table = PostcodeZoneTable::from_path(path)?;
            info!(path = %path.display(), zones = table.len(), "Zone table loaded");
            Arc::new(table)
        }
        None => Arc::new(NoZoneMatcher),
    };

    let engine = DecisionEngine::new(zones, clock).with_payment_rules(
        PaymentRules::with_weekday_restriction(payment_weekday_restriction_from_env()),
    );
    let decision = decide(&engine, args).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&decision)?);
    }

    Ok(())
}

/// Run the engine against a fresh in-memory checkout.
async fn decide(engine: &DecisionEngine, args: &DecideArgs) -> Result<StoreDecision, DecideError> {
    let request = DecisionRequest::new(
        &args.cep,
        ShippingMethod::from_request(Some(&args.shipping_method)),
        args.pickup_store.as_deref(),
        args.date.as_deref(),
        None,
    )?;

    let session = MemoryCheckoutStore::new();
    let log = DecisionLog::new("cli", "cli-decide");

    Ok(engine.decide(&request, &session, &log).await)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::FixedOffset;
    use store_decision_core::StoreId;

    use super::*;

    fn args(cep: &str) -> DecideArgs {
        DecideArgs {
            cep: cep.to_string(),
            shipping_method: "delivery".to_string(),
            pickup_store: None,
            date: None,
            at: None,
            zone_table: None,
        }
    }

    fn engine(weekday_restriction: bool) -> DecisionEngine {
        let offset = FixedOffset::west_opt(3 * 3600).unwrap();
        // Tuesday morning, before the cutoff.
        let now = DateTime::parse_from_rfc3339("2026-10-20T10:00:00-03:00").unwrap();
        let zones = PostcodeZoneTable::new().with_zone(24, &["30140*"]).unwrap();

        DecisionEngine::new(Arc::new(zones), Arc::new(FixedClock::at(&now, offset)))
            .with_payment_rules(PaymentRules::with_weekday_restriction(weekday_restriction))
    }

    fn method_ids(decision: &StoreDecision) -> Vec<&str> {
        decision
            .payment_methods
            .iter()
            .map(|method| method.id.as_str())
            .collect()
    }

    #[tokio::test]
    async fn test_weekday_restriction_limits_same_store_delivery() {
        let decision = decide(&engine(true), &args("30140-000")).await.unwrap();

        assert_eq!(decision.effective_store_final, StoreId::Barreiro);
        assert_eq!(method_ids(&decision), vec!["stripe", "pagarme_custom_pix"]);
    }

    #[tokio::test]
    async fn test_full_catalog_without_weekday_restriction() {
        let decision = decide(&engine(false), &args("30140-000")).await.unwrap();

        assert_eq!(decision.effective_store_final, StoreId::Barreiro);
        assert_eq!(decision.payment_methods.len(), 7);
    }

    #[tokio::test]
    async fn test_invalid_cep_is_an_argument_error() {
        let err = decide(&engine(false), &args("abc")).await.unwrap_err();
        assert!(matches!(err, DecideError::Cep(_)));
    }
}
