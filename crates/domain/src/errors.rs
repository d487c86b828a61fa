//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Coordinates outside the valid latitude/longitude range
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// City query rejected before resolution
    #[error("Invalid city query: {0}")]
    InvalidCityQuery(String),

    /// User key rejected
    #[error("Invalid user key: {0}")]
    InvalidUserKey(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_coordinates_message() {
        let err = DomainError::InvalidCoordinates;
        assert!(err.to_string().contains("latitude"));
        assert!(err.to_string().contains("longitude"));
    }

    #[test]
    fn invalid_city_query_message() {
        let err = DomainError::InvalidCityQuery("too short".to_string());
        assert_eq!(err.to_string(), "Invalid city query: too short");
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("series length mismatch".to_string());
        assert_eq!(err.to_string(), "Validation failed: series length mismatch");
    }
}
