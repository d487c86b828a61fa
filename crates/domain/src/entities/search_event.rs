//! Search history records and their aggregate

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::value_objects::UserKey;

/// One successful forecast lookup by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEvent {
    /// Who searched
    pub user: UserKey,
    /// Resolved display name of the city (not the raw query)
    pub city_name: String,
    /// Unix seconds
    pub timestamp: i64,
}

impl SearchEvent {
    /// Create an event at an explicit time
    pub fn new(user: UserKey, city_name: impl Into<String>, timestamp: i64) -> Self {
        Self {
            user,
            city_name: city_name.into(),
            timestamp,
        }
    }

    /// Create an event stamped with the current time
    pub fn now(user: UserKey, city_name: impl Into<String>) -> Self {
        Self::new(user, city_name, Utc::now().timestamp())
    }
}

/// How many times a city has been searched across all users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityPopularity {
    /// City display name
    pub city: String,
    /// Number of recorded searches
    pub count: u64,
}

impl CityPopularity {
    /// Create a popularity entry
    pub fn new(city: impl Into<String>, count: u64) -> Self {
        Self {
            city: city.into(),
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_uses_current_time() {
        let before = Utc::now().timestamp();
        let event = SearchEvent::now(UserKey::generate(), "Казань");
        let after = Utc::now().timestamp();
        assert!(event.timestamp >= before && event.timestamp <= after);
        assert_eq!(event.city_name, "Казань");
    }

    #[test]
    fn popularity_serializes_city_and_count() {
        let json = serde_json::to_value(CityPopularity::new("Москва", 10)).unwrap();
        assert_eq!(json, serde_json::json!({"city": "Москва", "count": 10}));
    }
}
