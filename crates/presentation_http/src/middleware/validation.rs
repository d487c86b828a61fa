//! Request validation
//!
//! Provides a `ValidatedQuery` extractor that deserializes the query string
//! and validates it with the validator crate.

use axum::{
    Json,
    extract::{FromRequestParts, Query, rejection::QueryRejection},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use domain::CityQuery;
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Validation error type
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid query string: {0}")]
    QueryError(#[from] QueryRejection),
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::QueryError(e) => e.body_text(),
            Self::ValidationFailed(msg) => msg.clone(),
        };

        let body = serde_json::json!({
            "error": message,
            "code": "validation_error"
        });

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// A query-string extractor that also validates the parameters
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct Params {
///     #[validate(custom(function = "validate_city_name"))]
///     q: String,
/// }
///
/// async fn handler(ValidatedQuery(params): ValidatedQuery<Params>) {}
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        value
            .validate()
            .map_err(|e| ValidationError::ValidationFailed(describe(&e)))?;
        Ok(Self(value))
    }
}

fn describe(errors: &ValidationErrors) -> String {
    let mut lines: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                format!(
                    "{}: {}",
                    field,
                    error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string)
                )
            })
        })
        .collect();
    lines.sort();
    lines.join("; ")
}

/// Field validator for city names: at least two characters once trimmed
pub fn validate_city_name(name: &str) -> Result<(), validator::ValidationError> {
    CityQuery::parse(name).map(|_| ()).map_err(|_| {
        validator::ValidationError::new("city_name").with_message(
            format!("must be at least {} characters", CityQuery::MIN_CHARS).into(),
        )
    })
}
