use serde::{Deserialize, Serialize};

/// The maximum number of usernames kept in the search history.
pub const SEARCH_HISTORY_CAPACITY: usize = 5;

/// The most recently searched distinct usernames, most recent first.
///
/// Never exceeds [`SEARCH_HISTORY_CAPACITY`] entries and never contains a
/// duplicate username. The persisted form is a plain JSON string array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHistory {
    entries: Vec<String>,
}

impl SearchHistory {
    /// Rebuilds a history from persisted entries, re-applying the capacity
    /// and duplicate rules in case the file was edited by hand.
    pub fn from_entries(entries: Vec<String>) -> Self {
        let mut history = Self::default();
        for entry in entries.iter().rev() {
            history.record(entry);
        }

        history
    }

    /// Records a username at the front, dropping any previous occurrence and
    /// the oldest entry beyond capacity.
    pub fn record(&mut self, username: &str) {
        self.entries.retain(|entry| entry != username);
        self.entries.insert(0, username.to_string());
        self.entries.truncate(SEARCH_HISTORY_CAPACITY);
    }

    /// Retrieves the recorded usernames, most recent first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// True when no username has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
