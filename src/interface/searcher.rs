use crate::{SearchError, SearchOutcome};

/// A trait for running one user-initiated profile search.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ProfileSearcher: Sync + Send {
    /// Validates the input, fetches the profile and repositories, and
    /// returns the merged result.
    async fn search(&self, raw_username: &str) -> Result<SearchOutcome, SearchError>;

    /// True when the local rate gate would admit a new search right now.
    async fn quota_available(&self) -> bool;
}
