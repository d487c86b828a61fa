//! Value Objects - Immutable, identity-less domain primitives

mod city_query;
mod geo_location;
mod user_key;

pub use city_query::CityQuery;
pub use geo_location::GeoLocation;
pub use user_key::UserKey;
