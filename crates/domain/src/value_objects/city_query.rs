//! Free-text city query

use std::fmt;

use crate::errors::DomainError;

/// A city name as typed by a user, trimmed and at least [`CityQuery::MIN_CHARS`] long
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CityQuery(String);

impl CityQuery {
    /// Minimum number of characters (not bytes) a query must have
    pub const MIN_CHARS: usize = 2;

    /// Validate and normalize a raw query
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCityQuery` when the trimmed input is shorter
    /// than [`Self::MIN_CHARS`] characters.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.chars().count() < Self::MIN_CHARS {
            return Err(DomainError::InvalidCityQuery(format!(
                "must be at least {} characters",
                Self::MIN_CHARS
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The normalized query text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CityQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_two_characters() {
        let q = CityQuery::parse("Ош").unwrap();
        assert_eq!(q.as_str(), "Ош");
    }

    #[test]
    fn counts_characters_not_bytes() {
        // "Я" is two bytes in UTF-8 but one character
        assert!(CityQuery::parse("Я").is_err());
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert!(CityQuery::parse("").is_err());
        assert!(CityQuery::parse("   ").is_err());
        assert!(CityQuery::parse(" a ").is_err());
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let q = CityQuery::parse("  Москва \n").unwrap();
        assert_eq!(q.to_string(), "Москва");
    }
}
