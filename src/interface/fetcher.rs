use crate::{ProfileEnvelope, Repository, SearchError, Username};

/// A trait for fetching profile data from the GitHub API.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ProfileFetcher: Sync + Send {
    /// Fetches the profile for the given login.
    async fn fetch_profile(&self, username: &Username) -> Result<ProfileEnvelope, SearchError>;

    /// Fetches the most recently updated repositories for the given login.
    async fn fetch_repositories(&self, username: &Username)
    -> Result<Vec<Repository>, SearchError>;
}
