//! Hourly forecast series and its display-ready points

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Quantity name of the 2 m air temperature series
pub const TEMPERATURE_2M: &str = "temperature_2m";

/// Unit reported when the provider omits one for [`TEMPERATURE_2M`]
pub const DEFAULT_TEMPERATURE_UNIT: &str = "°C";

/// Index-aligned hourly timestamps and temperature readings
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySeries {
    time: Vec<i64>,
    temperature_2m: Vec<f64>,
    units: HashMap<String, String>,
}

impl HourlySeries {
    /// Build a series, checking that both sequences have the same length
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` on a length mismatch.
    pub fn new(
        time: Vec<i64>,
        temperature_2m: Vec<f64>,
        units: HashMap<String, String>,
    ) -> Result<Self, DomainError> {
        if time.len() != temperature_2m.len() {
            return Err(DomainError::ValidationError(format!(
                "hourly series length mismatch: {} timestamps, {} readings",
                time.len(),
                temperature_2m.len()
            )));
        }
        Ok(Self {
            time,
            temperature_2m,
            units,
        })
    }

    /// Number of hourly points
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether the series has no points
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Unix timestamps, ascending
    #[must_use]
    pub fn timestamps(&self) -> &[i64] {
        &self.time
    }

    /// Temperature readings aligned with [`Self::timestamps`]
    #[must_use]
    pub fn temperatures(&self) -> &[f64] {
        &self.temperature_2m
    }

    /// Unit label for a measured quantity
    #[must_use]
    pub fn unit_for(&self, quantity: &str) -> Option<&str> {
        self.units.get(quantity).map(String::as_str)
    }

    /// Unit label for the temperature series, falling back to `°C`
    #[must_use]
    pub fn temperature_unit(&self) -> &str {
        self.unit_for(TEMPERATURE_2M)
            .unwrap_or(DEFAULT_TEMPERATURE_UNIT)
    }

    /// `(timestamp, temperature)` pairs in series order
    pub fn points(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.time
            .iter()
            .copied()
            .zip(self.temperature_2m.iter().copied())
    }
}

/// One forecast hour shaped for direct rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Wall-clock time, `HH:MM`
    pub time: String,
    /// Temperature reading
    pub temperature: f64,
    /// Unit of `temperature`
    pub unit: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(unit: &str) -> HashMap<String, String> {
        HashMap::from([(TEMPERATURE_2M.to_string(), unit.to_string())])
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let result = HourlySeries::new(vec![1, 2, 3], vec![1.0, 2.0], HashMap::new());
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[test]
    fn points_are_index_aligned() {
        let series =
            HourlySeries::new(vec![10, 20], vec![-1.5, 2.5], units("°C")).unwrap();
        let points: Vec<_> = series.points().collect();
        assert_eq!(points, vec![(10, -1.5), (20, 2.5)]);
        assert_eq!(series.len(), 2);
        assert!(!series.is_empty());
    }

    #[test]
    fn temperature_unit_defaults_to_celsius() {
        let series = HourlySeries::new(vec![], vec![], HashMap::new()).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.temperature_unit(), "°C");
    }

    #[test]
    fn temperature_unit_uses_reported_label() {
        let series = HourlySeries::new(vec![1], vec![40.0], units("°F")).unwrap();
        assert_eq!(series.temperature_unit(), "°F");
        assert_eq!(series.unit_for("time"), None);
    }
}
