//! CEP to zone matching.
//!
//! The engine only depends on [`ZoneMatcher`]. Two adapters are provided:
//! a local postcode table and a client for a remote matching service.

mod http;
mod table;

use std::time::Duration;

use async_trait::async_trait;
use store_decision_core::{Cep, ZoneId};
use thiserror::Error;

pub use http::HttpZoneMatcher;
pub use table::{PostcodeZoneTable, ZoneTableError};

/// Errors from a zone lookup.
///
/// None of these fail a decision: the engine logs them and resolves the
/// candidate store as if no zone matched.
#[derive(Debug, Error)]
pub enum ZoneLookupError {
    #[error("zone lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("zone service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("zone service returned HTTP {0}")]
    Status(u16),

    #[error("invalid zone service url: {0}")]
    Url(#[from] url::ParseError),
}

/// Matches a normalized CEP to a shipping zone.
#[async_trait]
pub trait ZoneMatcher: Send + Sync {
    /// Zone for the CEP, or `None` when no zone covers it.
    async fn match_zone(&self, cep: &Cep) -> Result<Option<ZoneId>, ZoneLookupError>;
}

/// Matcher used when no zone source is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoZoneMatcher;

#[async_trait]
impl ZoneMatcher for NoZoneMatcher {
    async fn match_zone(&self, _cep: &Cep) -> Result<Option<ZoneId>, ZoneLookupError> {
        Ok(None)
    }
}
