use super::SearchOutcome;

/// An opaque handle tying one search attempt to its generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// The pipeline-owned state of the current search session.
///
/// At most one outcome is current at a time; installing an outcome under a
/// stale ticket is a no-op, so a slow older search can never overwrite the
/// result of a newer one.
#[derive(Debug, Default)]
pub struct SearchSession {
    /// The outcome of the most recent completed search.
    current: Option<SearchOutcome>,

    /// The generation of the most recently started search.
    generation: u64,
}

impl SearchSession {
    /// Starts a new search attempt and returns its ticket.
    pub fn begin(&mut self) -> SearchTicket {
        self.generation += 1;

        SearchTicket(self.generation)
    }

    /// Installs the outcome of the given attempt, replacing the previous
    /// result wholesale. Returns false when a newer attempt has started
    /// since the ticket was issued.
    pub fn install(&mut self, ticket: SearchTicket, outcome: SearchOutcome) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        self.current = Some(outcome);

        true
    }

    /// Retrieves the outcome of the most recent completed search, if any.
    pub fn current(&self) -> Option<&SearchOutcome> {
        self.current.as_ref()
    }
}
