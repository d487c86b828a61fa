//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Resolution returned no city for the query
    #[error("City '{query}' not found")]
    CityNotFound {
        /// The query as the caller sent it
        query: String,
    },

    /// The forecast provider answered without an hourly payload
    #[error("Could not retrieve forecast")]
    ForecastUnavailable,

    /// A remote provider failed at transport level or returned a non-success status
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Store read or write failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation not allowed in the current state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Shorthand for [`ApplicationError::CityNotFound`]
    pub fn city_not_found(query: impl Into<String>) -> Self {
        Self::CityNotFound {
            query: query.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_not_found_message() {
        let err = ApplicationError::city_not_found("Qwxzzy");
        assert_eq!(err.to_string(), "City 'Qwxzzy' not found");
    }

    #[test]
    fn forecast_unavailable_message() {
        let err = ApplicationError::ForecastUnavailable;
        assert_eq!(err.to_string(), "Could not retrieve forecast");
    }

    #[test]
    fn domain_error_is_transparent() {
        let err: ApplicationError = DomainError::InvalidCoordinates.into();
        assert_eq!(err.to_string(), DomainError::InvalidCoordinates.to_string());
    }
}
