//! Search history and visitor cookie settings.

use application::HistoryWritePolicy;
use serde::{Deserialize, Serialize};

/// Search history configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// What a failed history write does to the forecast request
    #[serde(default)]
    pub write_policy: HistoryWritePolicy,
}

/// Visitor identification cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieConfig {
    /// Cookie name
    #[serde(default = "default_cookie_name")]
    pub name: String,

    /// Lifetime in days
    #[serde(default = "default_max_age_days")]
    pub max_age_days: u32,
}

fn default_cookie_name() -> String {
    "user_id".to_string()
}

const fn default_max_age_days() -> u32 {
    30
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: default_cookie_name(),
            max_age_days: default_max_age_days(),
        }
    }
}
