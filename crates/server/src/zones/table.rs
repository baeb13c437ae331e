//! Local postcode zone table.
//!
//! Rules follow the shipping-zone notation checkout platforms use:
//!
//! - `30140000` exact postcode
//! - `3014*` postcode prefix
//! - `30100000...30199999` inclusive numeric range
//!
//! Punctuation in rules is ignored, so `30140-000` and `30140000` are the
//! same rule. Zones are checked in file order and the first match wins.

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use store_decision_core::{Cep, ZoneId};
use thiserror::Error;

use super::{ZoneLookupError, ZoneMatcher};

/// Errors loading a zone table.
#[derive(Debug, Error)]
pub enum ZoneTableError {
    #[error("failed to read zone table: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse zone table: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid postcode rule {rule:?} in zone {zone_id}")]
    InvalidRule { zone_id: ZoneId, rule: String },
}

#[derive(Debug, Deserialize)]
struct ZoneTableFile {
    zones: Vec<ZoneEntry>,
}

#[derive(Debug, Deserialize)]
struct ZoneEntry {
    zone_id: ZoneId,
    postcodes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PostcodeRule {
    Exact(String),
    Prefix(String),
    Range(u64, u64),
}

impl PostcodeRule {
    fn parse(raw: &str) -> Option<Self> {
        let digits = |s: &str| -> String { s.chars().filter(char::is_ascii_digit).collect() };

        if let Some((low, high)) = raw.split_once("...") {
            let low = digits(low).parse().ok()?;
            let high = digits(high).parse().ok()?;
            return (low <= high).then_some(Self::Range(low, high));
        }
        if let Some(prefix) = raw.trim().strip_suffix('*') {
            let prefix = digits(prefix);
            return (!prefix.is_empty()).then_some(Self::Prefix(prefix));
        }
        let exact = digits(raw);
        (!exact.is_empty()).then_some(Self::Exact(exact))
    }

    fn matches(&self, cep: &Cep) -> bool {
        match self {
            Self::Exact(code) => cep.as_str() == code,
            Self::Prefix(prefix) => cep.as_str().starts_with(prefix.as_str()),
            Self::Range(low, high) => cep
                .as_number()
                .is_some_and(|value| (*low..=*high).contains(&value)),
        }
    }
}

#[derive(Debug, Clone)]
struct Zone {
    id: ZoneId,
    rules: Vec<PostcodeRule>,
}

/// Ordered postcode rules per zone.
#[derive(Debug, Clone, Default)]
pub struct PostcodeZoneTable {
    zones: Vec<Zone>,
}

impl PostcodeZoneTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a zone with its postcode rules.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneTableError::InvalidRule`] for a rule with no digits or
    /// a range whose bounds are reversed.
    pub fn with_zone<S: AsRef<str>>(
        mut self,
        zone_id: impl Into<ZoneId>,
        postcodes: &[S],
    ) -> Result<Self, ZoneTableError> {
        self.push(zone_id.into(), postcodes)?;
        Ok(self)
    }

    /// Parse a table from its JSON form. Fields other than `zone_id` and
    /// `postcodes`, such as a zone `name`, are ignored.
    ///
    /// ```json
    /// { "zones": [ { "zone_id": 24, "name": "Barreiro", "postcodes": ["30640*"] } ] }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ZoneTableError`] on malformed JSON or an invalid rule.
    pub fn from_json_str(json: &str) -> Result<Self, ZoneTableError> {
        let file: ZoneTableFile = serde_json::from_str(json)?;
        let mut table = Self::new();
        for entry in file.zones {
            table.push(entry.zone_id, &entry.postcodes)?;
        }
        Ok(table)
    }

    /// Load a table from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneTableError`] if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ZoneTableError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// First zone with a rule matching the CEP.
    #[must_use]
    pub fn lookup(&self, cep: &Cep) -> Option<ZoneId> {
        self.zones
            .iter()
            .find(|zone| zone.rules.iter().any(|rule| rule.matches(cep)))
            .map(|zone| zone.id)
    }

    /// Number of zones in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether the table has no zones.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    fn push<S: AsRef<str>>(
        &mut self,
        id: ZoneId,
        postcodes: &[S],
    ) -> Result<(), ZoneTableError> {
        let rules = postcodes
            .iter()
            .map(|raw| {
                PostcodeRule::parse(raw.as_ref()).ok_or_else(|| ZoneTableError::InvalidRule {
                    zone_id: id,
                    rule: raw.as_ref().to_owned(),
                })
            })
            .collect::<Result<_, _>>()?;
        self.zones.push(Zone { id, rules });
        Ok(())
    }
}

#[async_trait]
impl ZoneMatcher for PostcodeZoneTable {
    async fn match_zone(&self, cep: &Cep) -> Result<Option<ZoneId>, ZoneLookupError> {
        Ok(self.lookup(cep))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cep(raw: &str) -> Cep {
        Cep::parse(raw).unwrap()
    }

    #[test]
    fn test_rule_kinds() {
        let table = PostcodeZoneTable::new()
            .with_zone(24, &["30640-000"])
            .unwrap()
            .with_zone(12, &["30310*"])
            .unwrap()
            .with_zone(50, &["30100000...30199999"])
            .unwrap();

        assert_eq!(table.lookup(&cep("30640000")), Some(ZoneId::new(24)));
        assert_eq!(table.lookup(&cep("30310-120")), Some(ZoneId::new(12)));
        assert_eq!(table.lookup(&cep("30140-000")), Some(ZoneId::new(50)));
        assert_eq!(table.lookup(&cep("30200000")), None);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_first_zone_in_order_wins() {
        let table = PostcodeZoneTable::new()
            .with_zone(11, &["301*"])
            .unwrap()
            .with_zone(114, &["30140000"])
            .unwrap();
        assert_eq!(table.lookup(&cep("30140000")), Some(ZoneId::new(11)));
    }

    #[test]
    fn test_from_json_str() {
        let table = PostcodeZoneTable::from_json_str(
            r#"{
                "zones": [
                    { "zone_id": 24, "name": "Barreiro", "postcodes": ["30640*", "30642000"] },
                    { "zone_id": 114, "postcodes": ["30315000...30315999"] }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(table.lookup(&cep("30642000")), Some(ZoneId::new(24)));
        assert_eq!(table.lookup(&cep("30315-500")), Some(ZoneId::new(114)));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_invalid_rules_are_rejected() {
        assert!(matches!(
            PostcodeZoneTable::new().with_zone(1, &["*"]),
            Err(ZoneTableError::InvalidRule { .. })
        ));
        assert!(matches!(
            PostcodeZoneTable::new().with_zone(1, &["30199999...30100000"]),
            Err(ZoneTableError::InvalidRule { .. })
        ));
        assert!(matches!(
            PostcodeZoneTable::from_json_str("{ \"zones\": 3 }"),
            Err(ZoneTableError::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_match_zone_never_errors() {
        let table = PostcodeZoneTable::new().with_zone(24, &["30640*"]).unwrap();
        assert_eq!(
            table.match_zone(&cep("30640100")).await.unwrap(),
            Some(ZoneId::new(24))
        );
        assert_eq!(table.match_zone(&cep("01001000")).await.unwrap(), None);
    }
}
