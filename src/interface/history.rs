use crate::{SearchHistory, StdResult};

/// A trait for persisting the search history to a storage medium.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait HistoryStore: Sync + Send {
    /// Loads the persisted history, empty when none has been saved yet.
    async fn load(&self) -> StdResult<SearchHistory>;

    /// Persists the history, replacing the previous contents.
    async fn save(&self, history: &SearchHistory) -> StdResult<()>;
}
