use std::sync::Arc;

use chrono::Utc;
use log::{info, warn};
use tokio::sync::RwLock;

use crate::{
    HistoryStore, ProfileFetcher, ProfileSearcher, RateGate, SearchError, SearchHistory,
    SearchOutcome, SearchSession, Username,
};

/// The validate, gate, fetch and merge flow behind one user search.
///
/// Owns the rate gate and the session state explicitly, so repeated searches
/// stay independently testable.
pub struct SearchPipeline {
    /// The fetcher used for profile and repository data.
    fetcher: Arc<dyn ProfileFetcher>,

    /// The store used to persist the search history.
    history: Arc<dyn HistoryStore>,

    /// The local rate gate, overwritten after each successful profile fetch.
    rate_gate: RwLock<RateGate>,

    /// The session holding the current result and the search generation.
    session: RwLock<SearchSession>,
}

impl SearchPipeline {
    /// Creates a new `SearchPipeline` instance with the given fetcher and history store.
    pub fn new(fetcher: Arc<dyn ProfileFetcher>, history: Arc<dyn HistoryStore>) -> Self {
        Self {
            fetcher,
            history,
            rate_gate: RwLock::new(RateGate::default()),
            session: RwLock::new(SearchSession::default()),
        }
    }

    /// Retrieves the outcome of the most recent completed search, if any.
    pub async fn current_outcome(&self) -> Option<SearchOutcome> {
        self.session.read().await.current().cloned()
    }

    /// Records the username in the history, best-effort: a store failure is
    /// logged and never surfaced to the caller.
    async fn record_in_history(&self, username: &Username) {
        let mut history = match self.history.load().await {
            Ok(history) => history,
            Err(e) => {
                warn!("Failed to load the search history: {e}");
                SearchHistory::default()
            }
        };
        history.record(username);
        if let Err(e) = self.history.save(&history).await {
            warn!("Failed to save the search history: {e}");
        }
    }
}

#[async_trait::async_trait]
impl ProfileSearcher for SearchPipeline {
    async fn search(&self, raw_username: &str) -> Result<SearchOutcome, SearchError> {
        let username = Username::parse(raw_username)?;
        {
            let rate_gate = self.rate_gate.read().await;
            if !rate_gate.check_available(Utc::now()) {
                return Err(SearchError::RateLimited {
                    resets_at: Some(rate_gate.snapshot().resets_at()),
                });
            }
        }
        let ticket = self.session.write().await.begin();

        info!("Searching profile for {username}");
        let (profile_result, repositories_result) = tokio::join!(
            self.fetcher.fetch_profile(&username),
            self.fetcher.fetch_repositories(&username),
        );

        let (profile, rate_limit) = profile_result?.into_parts();
        self.rate_gate
            .write()
            .await
            .record(rate_limit.unwrap_or_default());
        let repositories = repositories_result.unwrap_or_else(|e| {
            warn!("Repository fetch failed for {username}: {e}");
            Vec::new()
        });

        info!("Fetched {profile}");
        let outcome = SearchOutcome::new(profile, repositories);
        self.record_in_history(&username).await;
        if !self.session.write().await.install(ticket, outcome.clone()) {
            info!("Discarding the result of a superseded search for {username}");
        }

        Ok(outcome)
    }

    async fn quota_available(&self) -> bool {
        self.rate_gate.read().await.check_available(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use chrono::{Duration, Utc};

    use crate::{
        MockHistoryStore, MockProfileFetcher, Profile, ProfileEnvelope, RateLimitSnapshot,
        Repository,
    };

    use super::*;

    fn history_store_ignoring_everything() -> MockHistoryStore {
        let mut history = MockHistoryStore::new();
        history
            .expect_load()
            .returning(|| Ok(SearchHistory::default()));
        history.expect_save().returning(|_| Ok(()));

        history
    }

    #[tokio::test]
    async fn search_rejects_empty_and_whitespace_only_input_without_fetching() {
        let fetcher = MockProfileFetcher::new();
        let history = MockHistoryStore::new();
        let pipeline = SearchPipeline::new(Arc::new(fetcher), Arc::new(history));

        assert_eq!(
            SearchError::InvalidInput,
            pipeline.search("").await.unwrap_err()
        );
        assert_eq!(
            SearchError::InvalidInput,
            pipeline.search("   ").await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn search_merges_the_profile_and_the_repositories() {
        let fetcher = {
            let mut fetcher = MockProfileFetcher::new();
            fetcher
                .expect_fetch_profile()
                .returning(|_| {
                    Ok(ProfileEnvelope::new(
                        Profile::dummy(),
                        Some(RateLimitSnapshot::dummy()),
                    ))
                })
                .times(1);
            fetcher
                .expect_fetch_repositories()
                .returning(|_| Ok(vec![Repository::dummy("hello-world", 1500)]))
                .times(1);

            fetcher
        };
        let pipeline = SearchPipeline::new(
            Arc::new(fetcher),
            Arc::new(history_store_ignoring_everything()),
        );

        let outcome = pipeline.search("octocat").await.unwrap();

        assert_eq!(&Profile::dummy(), outcome.profile());
        assert_eq!(
            [Repository::dummy("hello-world", 1500)],
            outcome.repositories()
        );
    }

    #[tokio::test]
    async fn search_surfaces_user_not_found_regardless_of_the_repository_outcome() {
        let fetcher = {
            let mut fetcher = MockProfileFetcher::new();
            fetcher
                .expect_fetch_profile()
                .returning(|_| Err(SearchError::UserNotFound("ghost".to_string())))
                .times(1);
            fetcher
                .expect_fetch_repositories()
                .returning(|_| Ok(vec![Repository::dummy("orphan", 1)]))
                .times(1);

            fetcher
        };
        let pipeline = SearchPipeline::new(
            Arc::new(fetcher),
            Arc::new(history_store_ignoring_everything()),
        );

        let error = pipeline.search("ghost").await.unwrap_err();

        assert_eq!(SearchError::UserNotFound("ghost".to_string()), error);
    }

    #[tokio::test]
    async fn repository_fetch_failure_degrades_to_an_empty_list() {
        let fetcher = {
            let mut fetcher = MockProfileFetcher::new();
            fetcher
                .expect_fetch_profile()
                .returning(|_| {
                    Ok(ProfileEnvelope::new(
                        Profile::dummy(),
                        Some(RateLimitSnapshot::dummy()),
                    ))
                })
                .times(1);
            fetcher
                .expect_fetch_repositories()
                .returning(|_| Err(SearchError::FetchFailed("unexpected status 500".to_string())))
                .times(1);

            fetcher
        };
        let pipeline = SearchPipeline::new(
            Arc::new(fetcher),
            Arc::new(history_store_ignoring_everything()),
        );

        let outcome = pipeline.search("octocat").await.unwrap();

        assert!(outcome.repositories().is_empty());
    }

    #[tokio::test]
    async fn exhausted_gate_short_circuits_without_any_network_call() {
        let fetcher = {
            let mut fetcher = MockProfileFetcher::new();
            fetcher
                .expect_fetch_profile()
                .returning(|_| {
                    Ok(ProfileEnvelope::new(
                        Profile::dummy(),
                        Some(RateLimitSnapshot::new(0, Utc::now() + Duration::hours(1))),
                    ))
                })
                .times(1);
            fetcher
                .expect_fetch_repositories()
                .returning(|_| Ok(vec![]))
                .times(1);

            fetcher
        };
        let pipeline = SearchPipeline::new(
            Arc::new(fetcher),
            Arc::new(history_store_ignoring_everything()),
        );

        pipeline.search("octocat").await.unwrap();
        assert!(!pipeline.quota_available().await);

        let error = pipeline.search("torvalds").await.unwrap_err();

        assert!(matches!(error, SearchError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn missing_rate_headers_do_not_block_the_next_search() {
        let fetcher = {
            let mut fetcher = MockProfileFetcher::new();
            fetcher
                .expect_fetch_profile()
                .returning(|_| Ok(ProfileEnvelope::new(Profile::dummy(), None)))
                .times(2);
            fetcher
                .expect_fetch_repositories()
                .returning(|_| Ok(vec![]))
                .times(2);

            fetcher
        };
        let pipeline = SearchPipeline::new(
            Arc::new(fetcher),
            Arc::new(history_store_ignoring_everything()),
        );

        pipeline.search("octocat").await.unwrap();
        assert!(pipeline.quota_available().await);
        pipeline.search("torvalds").await.unwrap();
    }

    #[tokio::test]
    async fn search_records_the_username_in_the_history() {
        let fetcher = {
            let mut fetcher = MockProfileFetcher::new();
            fetcher
                .expect_fetch_profile()
                .returning(|_| Ok(ProfileEnvelope::new(Profile::dummy(), None)))
                .times(1);
            fetcher
                .expect_fetch_repositories()
                .returning(|_| Ok(vec![]))
                .times(1);

            fetcher
        };
        let history = {
            let mut history = MockHistoryStore::new();
            history
                .expect_load()
                .returning(|| Ok(SearchHistory::default()))
                .times(1);
            history
                .expect_save()
                .withf(|history| history.entries() == ["octocat"])
                .returning(|_| Ok(()))
                .times(1);

            history
        };
        let pipeline = SearchPipeline::new(Arc::new(fetcher), Arc::new(history));

        pipeline.search("octocat").await.unwrap();
    }

    #[tokio::test]
    async fn history_store_failures_are_not_fatal() {
        let fetcher = {
            let mut fetcher = MockProfileFetcher::new();
            fetcher
                .expect_fetch_profile()
                .returning(|_| Ok(ProfileEnvelope::new(Profile::dummy(), None)))
                .times(1);
            fetcher
                .expect_fetch_repositories()
                .returning(|_| Ok(vec![]))
                .times(1);

            fetcher
        };
        let history = {
            let mut history = MockHistoryStore::new();
            history
                .expect_load()
                .returning(|| Err(anyhow!("corrupted history file")))
                .times(1);
            history
                .expect_save()
                .returning(|_| Err(anyhow!("disk full")))
                .times(1);

            history
        };
        let pipeline = SearchPipeline::new(Arc::new(fetcher), Arc::new(history));

        pipeline.search("octocat").await.unwrap();
    }

    #[tokio::test]
    async fn a_new_search_fully_replaces_the_current_outcome() {
        let fetcher = {
            let mut fetcher = MockProfileFetcher::new();
            fetcher
                .expect_fetch_profile()
                .returning(|_| Ok(ProfileEnvelope::new(Profile::dummy(), None)))
                .times(2);
            fetcher
                .expect_fetch_repositories()
                .returning(|_| Ok(vec![Repository::dummy("first", 1)]))
                .times(1);
            fetcher
                .expect_fetch_repositories()
                .returning(|_| Ok(vec![Repository::dummy("second", 2)]))
                .times(1);

            fetcher
        };
        let pipeline = SearchPipeline::new(
            Arc::new(fetcher),
            Arc::new(history_store_ignoring_everything()),
        );

        pipeline.search("octocat").await.unwrap();
        pipeline.search("torvalds").await.unwrap();

        let current = pipeline.current_outcome().await.unwrap();
        assert_eq!([Repository::dummy("second", 2)], current.repositories());
    }
}
