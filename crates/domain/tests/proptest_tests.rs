//! Property-based tests for domain value objects

use domain::{CityQuery, GeoLocation, HourlySeries, UserKey, fold_name};
use proptest::prelude::*;
use std::collections::HashMap;

mod geo_location_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_coordinates_create_location(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let loc = GeoLocation::new(lat, lon);
            prop_assert!(loc.is_ok());
        }

        #[test]
        fn invalid_latitude_rejected(
            lat in prop_oneof![
                (-1000.0f64..-90.1f64),
                (90.1f64..1000.0f64)
            ],
            lon in -180.0f64..=180.0f64
        ) {
            prop_assert!(GeoLocation::new(lat, lon).is_err());
        }
    }
}

mod city_query_tests {
    use super::*;

    proptest! {
        #[test]
        fn parse_is_idempotent(raw in "\\PC{0,40}") {
            if let Ok(query) = CityQuery::parse(&raw) {
                let again = CityQuery::parse(query.as_str());
                prop_assert_eq!(again.ok(), Some(query));
            }
        }

        #[test]
        fn accepted_queries_have_min_chars(raw in "\\PC{0,40}") {
            if let Ok(query) = CityQuery::parse(&raw) {
                prop_assert!(query.as_str().chars().count() >= CityQuery::MIN_CHARS);
                prop_assert_eq!(query.as_str(), query.as_str().trim());
            }
        }

        #[test]
        fn fold_name_is_idempotent(name in "[\\p{Cyrillic}\\p{Latin} -]{0,30}") {
            let once = fold_name(&name);
            prop_assert_eq!(fold_name(&once), once);
        }
    }
}

mod user_key_tests {
    use super::*;

    proptest! {
        #[test]
        fn alphanumeric_keys_are_accepted(raw in "[a-zA-Z0-9_-]{1,128}") {
            prop_assert!(UserKey::parse(&raw).is_ok());
        }
    }
}

mod hourly_series_tests {
    use super::*;

    proptest! {
        #[test]
        fn equal_lengths_always_build(values in prop::collection::vec(-60.0f64..60.0, 0..48)) {
            let time: Vec<i64> = (0..values.len() as i64).map(|i| i * 3600).collect();
            let series = HourlySeries::new(time, values.clone(), HashMap::new());
            prop_assert!(series.is_ok());
            prop_assert_eq!(series.unwrap().len(), values.len());
        }
    }
}
