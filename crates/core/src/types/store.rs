//! Fulfillment store identities.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a known store.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown store: {0:?}")]
pub struct StoreIdError(pub String);

/// A fulfillment location.
///
/// The set is closed: two physical stores and the Central distribution
/// warehouse. Central is the fallback for every failed or unmatched decision.
///
/// Stores serialize to their canonical display names, which are the values
/// the checkout front-end and the order metadata have always carried.
///
/// ## Examples
///
/// ```
/// use store_decision_core::StoreId;
///
/// assert_eq!(StoreId::parse("Unidade Sion"), Ok(StoreId::Sion));
/// assert_eq!(StoreId::parse("barreiro"), Ok(StoreId::Barreiro));
/// assert!(StoreId::parse("Unidade Savassi").is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum StoreId {
    /// Barreiro physical store.
    #[serde(rename = "Unidade Barreiro")]
    Barreiro,
    /// Sion physical store.
    #[serde(rename = "Unidade Sion")]
    Sion,
    /// Central distribution warehouse (Sagrada Família).
    #[default]
    #[serde(rename = "Central Distribuição (Sagrada Família)")]
    Central,
}

impl StoreId {
    /// Every store, physical stores first.
    pub const ALL: [Self; 3] = [Self::Barreiro, Self::Sion, Self::Central];

    /// Canonical display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Barreiro => "Unidade Barreiro",
            Self::Sion => "Unidade Sion",
            Self::Central => "Central Distribuição (Sagrada Família)",
        }
    }

    /// Short lowercase identifier, used by CLI flags and config files.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Barreiro => "barreiro",
            Self::Sion => "sion",
            Self::Central => "central",
        }
    }

    /// Whether this is one of the physical stores.
    #[must_use]
    pub const fn is_physical(self) -> bool {
        matches!(self, Self::Barreiro | Self::Sion)
    }

    /// Parse a store from its canonical name or its slug.
    ///
    /// Surrounding whitespace is ignored and slugs match case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`StoreIdError`] if the input names no known store.
    pub fn parse(s: &str) -> Result<Self, StoreIdError> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|store| {
                store.name() == trimmed || store.slug().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| StoreIdError(trimmed.to_owned()))
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for StoreId {
    type Err = StoreIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        for store in StoreId::ALL {
            assert_eq!(StoreId::parse(store.name()).unwrap(), store);
        }
    }

    #[test]
    fn test_parse_slugs_case_insensitive() {
        assert_eq!(StoreId::parse("SION").unwrap(), StoreId::Sion);
        assert_eq!(StoreId::parse(" central ").unwrap(), StoreId::Central);
    }

    #[test]
    fn test_parse_unknown() {
        let err = StoreId::parse("Unidade Pampulha").unwrap_err();
        assert_eq!(err, StoreIdError("Unidade Pampulha".to_string()));
        assert!(StoreId::parse("").is_err());
    }

    #[test]
    fn test_serde_uses_canonical_name() {
        let json = serde_json::to_string(&StoreId::Central).unwrap();
        assert_eq!(json, "\"Central Distribuição (Sagrada Família)\"");

        let store: StoreId = serde_json::from_str("\"Unidade Barreiro\"").unwrap();
        assert_eq!(store, StoreId::Barreiro);
    }

    #[test]
    fn test_only_central_is_not_physical() {
        assert!(StoreId::Barreiro.is_physical());
        assert!(StoreId::Sion.is_physical());
        assert!(!StoreId::Central.is_physical());
        assert_eq!(StoreId::default(), StoreId::Central);
    }
}
