//! Search history port

use async_trait::async_trait;
use domain::{CityPopularity, SearchEvent, UserKey};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the append-only search log
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SearchHistoryStore: Send + Sync {
    /// Record one event. The write is atomic.
    async fn append(&self, event: &SearchEvent) -> Result<(), ApplicationError>;

    /// City names searched by `user`, most recent first, each name once
    ///
    /// A name keeps the position of its most recent occurrence.
    async fn list_distinct_recent_first(
        &self,
        user: &UserKey,
    ) -> Result<Vec<String>, ApplicationError>;

    /// Search counts per city across all users, highest count first
    async fn frequency_ranking(&self) -> Result<Vec<CityPopularity>, ApplicationError>;
}
