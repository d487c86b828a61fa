//! Opaque per-browser user key

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

/// Stable identifier of an anonymous user, carried in a cookie
///
/// The value is opaque: it is only ever compared for equality and used as a
/// grouping key for search history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserKey(String);

impl UserKey {
    /// Longest accepted key
    pub const MAX_LEN: usize = 128;

    /// Issue a fresh random key
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Accept a key received from a client
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUserKey` for empty, oversized or
    /// control-character-bearing values.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if raw.is_empty() {
            return Err(DomainError::InvalidUserKey("empty".to_string()));
        }
        if raw.len() > Self::MAX_LEN {
            return Err(DomainError::InvalidUserKey(format!(
                "longer than {} bytes",
                Self::MAX_LEN
            )));
        }
        if raw.chars().any(char::is_control) {
            return Err(DomainError::InvalidUserKey(
                "contains control characters".to_string(),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    /// Borrow the raw key
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
