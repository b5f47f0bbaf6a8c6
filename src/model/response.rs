use super::{Profile, RateLimitSnapshot, Repository};

/// A fetched profile paired with the rate-limit metadata its response carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEnvelope {
    /// The fetched profile.
    pub(crate) profile: Profile,

    /// The rate-limit snapshot, when the response headers carried one.
    pub(crate) rate_limit: Option<RateLimitSnapshot>,
}

impl ProfileEnvelope {
    /// Creates a new `ProfileEnvelope` instance.
    pub fn new(profile: Profile, rate_limit: Option<RateLimitSnapshot>) -> Self {
        Self {
            profile,
            rate_limit,
        }
    }

    /// Retrieves the fetched profile.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Retrieves the rate-limit snapshot, when the response carried one.
    pub fn rate_limit(&self) -> Option<&RateLimitSnapshot> {
        self.rate_limit.as_ref()
    }

    /// Splits the envelope into the profile and the rate-limit snapshot.
    pub fn into_parts(self) -> (Profile, Option<RateLimitSnapshot>) {
        (self.profile, self.rate_limit)
    }
}

/// The merged result of one successful search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// The fetched profile.
    pub(crate) profile: Profile,

    /// The most recently updated repositories, empty when their fetch failed.
    pub(crate) repositories: Vec<Repository>,
}

impl SearchOutcome {
    /// Creates a new `SearchOutcome` instance.
    pub fn new(profile: Profile, repositories: Vec<Repository>) -> Self {
        Self {
            profile,
            repositories,
        }
    }

    /// Retrieves the fetched profile.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Retrieves the fetched repositories.
    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }
}
