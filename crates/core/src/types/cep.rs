//! Brazilian postal code (CEP) type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Cep`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CepError {
    /// The input has no digits at all.
    #[error("CEP não fornecido")]
    Empty,
}

/// A normalized postal code.
///
/// Normalization keeps digits only, so `"30140-000"`, `"30.140-000"` and
/// `"30140000"` are the same CEP. No length check is applied: the zone
/// matcher decides what a partial code matches.
///
/// ## Examples
///
/// ```
/// use store_decision_core::Cep;
///
/// assert_eq!(Cep::parse("30140-000").unwrap().as_str(), "30140000");
/// assert!(Cep::parse(" - ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Cep(String);

impl Cep {
    /// Parse a `Cep`, stripping every non-digit character.
    ///
    /// # Errors
    ///
    /// Returns [`CepError::Empty`] if no digits remain.
    pub fn parse(raw: &str) -> Result<Self, CepError> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(CepError::Empty);
        }
        Ok(Self(digits))
    }

    /// Parse the first non-empty candidate, in order.
    ///
    /// Checkout forms carry billing and shipping postcodes; the billing one
    /// wins when both are present.
    #[must_use]
    pub fn first_of<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<Self> {
        candidates
            .into_iter()
            .flatten()
            .find_map(|raw| Self::parse(raw).ok())
    }

    /// Returns the digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the code, used for range matching.
    #[must_use]
    pub fn as_number(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for Cep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Cep {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_formatting() {
        assert_eq!(Cep::parse("30140-000").unwrap().as_str(), "30140000");
        assert_eq!(Cep::parse(" 30.640-180 ").unwrap().as_str(), "30640180");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Cep::parse(""), Err(CepError::Empty));
        assert_eq!(Cep::parse("abc-"), Err(CepError::Empty));
    }

    #[test]
    fn test_first_of_prefers_earlier_candidate() {
        let cep = Cep::first_of([Some(""), Some("30310-000"), Some("30140000")]).unwrap();
        assert_eq!(cep.as_str(), "30310000");
        assert!(Cep::first_of([None, Some("--")]).is_none());
    }

    #[test]
    fn test_as_number() {
        assert_eq!(Cep::parse("01310100").unwrap().as_number(), Some(1_310_100));
    }
}
