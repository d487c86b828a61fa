//! Database health check port
//!
//! Lets readiness probes check the store without knowing the backend.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Result of a store health probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseHealth {
    /// Whether the database answered the probe
    pub reachable: bool,
    /// Engine version, if the backend reports one
    pub version: Option<String>,
    /// Probe round-trip in milliseconds
    pub response_time_ms: Option<u64>,
}

impl DatabaseHealth {
    /// Reachable database with a known engine version
    #[must_use]
    pub fn reachable(version: impl Into<String>) -> Self {
        Self {
            reachable: true,
            version: Some(version.into()),
            response_time_ms: None,
        }
    }

    /// Database that did not answer
    #[must_use]
    pub const fn unreachable() -> Self {
        Self {
            reachable: false,
            version: None,
            response_time_ms: None,
        }
    }

    /// Attach the probe round-trip time
    #[must_use]
    pub const fn with_response_time(mut self, ms: u64) -> Self {
        self.response_time_ms = Some(ms);
        self
    }
}

/// Port for database health checking
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DatabaseHealthPort: Send + Sync {
    /// Cheap liveness probe (`SELECT 1`)
    async fn is_available(&self) -> bool;

    /// Detailed probe including engine version and timing
    async fn check_health(&self) -> Result<DatabaseHealth, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn DatabaseHealthPort) {}

    #[test]
    fn reachable_carries_version() {
        let health = DatabaseHealth::reachable("3.45.1").with_response_time(2);
        assert!(health.reachable);
        assert_eq!(health.version.as_deref(), Some("3.45.1"));
        assert_eq!(health.response_time_ms, Some(2));
    }

    #[test]
    fn unreachable_has_no_details() {
        let health = DatabaseHealth::unreachable();
        assert!(!health.reachable);
        assert!(health.version.is_none());
    }
}
