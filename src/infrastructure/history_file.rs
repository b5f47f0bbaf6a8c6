use std::path::PathBuf;

use anyhow::Context;
use log::debug;

use crate::{HistoryStore, SearchHistory, StdResult};

/// A history store backed by a JSON file holding a plain array of usernames.
///
/// The file is overwritten wholesale on each save; a missing file loads as
/// an empty history.
pub struct JsonFileHistoryStore {
    path: PathBuf,
}

impl JsonFileHistoryStore {
    /// Creates a new `JsonFileHistoryStore` writing to the given path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait::async_trait]
impl HistoryStore for JsonFileHistoryStore {
    async fn load(&self) -> StdResult<SearchHistory> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SearchHistory::default());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read the search history from {}", self.path.display())
                });
            }
        };
        let entries: Vec<String> = serde_json::from_str(&contents).with_context(|| {
            format!("Failed to parse the search history from {}", self.path.display())
        })?;

        Ok(SearchHistory::from_entries(entries))
    }

    async fn save(&self, history: &SearchHistory) -> StdResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create the history directory {}", parent.display())
            })?;
        }
        let contents = serde_json::to_string_pretty(history)?;
        tokio::fs::write(&self.path, contents).await.with_context(|| {
            format!("Failed to write the search history to {}", self.path.display())
        })?;
        debug!("Saved {} search history entries", history.entries().len());

        Ok(())
    }
}
