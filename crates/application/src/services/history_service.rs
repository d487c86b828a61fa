//! Search history queries

use std::sync::Arc;

use domain::{CityPopularity, UserKey};
use tracing::instrument;

use crate::error::ApplicationError;
use crate::ports::SearchHistoryStore;

/// Read side of the search log
pub struct HistoryService {
    store: Arc<dyn SearchHistoryStore>,
}

impl std::fmt::Debug for HistoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryService").finish_non_exhaustive()
    }
}

impl HistoryService {
    /// Create a history service over a store
    #[must_use]
    pub fn new(store: Arc<dyn SearchHistoryStore>) -> Self {
        Self { store }
    }

    /// Cities searched by `user`, most recent first
    ///
    /// A caller without a user key has no history.
    #[instrument(skip(self))]
    pub async fn recent_cities(
        &self,
        user: Option<&UserKey>,
    ) -> Result<Vec<String>, ApplicationError> {
        match user {
            Some(user) => self.store.list_distinct_recent_first(user).await,
            None => Ok(Vec::new()),
        }
    }

    /// Most searched cities across all users
    #[instrument(skip(self))]
    pub async fn popularity(&self) -> Result<Vec<CityPopularity>, ApplicationError> {
        self.store.frequency_ranking().await
    }
}
