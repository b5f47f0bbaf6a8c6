use std::{fmt::Display, ops::Deref};

use chrono::{DateTime, Utc};

use super::SearchError;

const FALLBACK_BIO: &str = "No bio available";
const FALLBACK_NOT_SPECIFIED: &str = "Not specified";
const FALLBACK_NOT_AVAILABLE: &str = "Not available";

/// A validated GitHub login.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Parses a raw input into a `Username`, rejecting empty or whitespace-only values.
    pub fn parse(raw: &str) -> Result<Self, SearchError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SearchError::InvalidInput);
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl Deref for Username {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The subset of a user's public account fields consumed for display.
///
/// Immutable once fetched; optional fields are substituted with a defined
/// fallback text by their accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// The account login.
    pub(crate) login: String,

    /// The display name, when the user has set one.
    pub(crate) display_name: Option<String>,

    /// The profile biography, when the user has set one.
    pub(crate) bio: Option<String>,

    /// The number of followers.
    pub(crate) followers: u32,

    /// The number of accounts followed.
    pub(crate) following: u32,

    /// The number of public repositories.
    pub(crate) public_repositories: u32,

    /// The location, when the user has set one.
    pub(crate) location: Option<String>,

    /// The website URL, when the user has set one.
    pub(crate) website_url: Option<String>,

    /// The company, when the user has set one.
    pub(crate) company: Option<String>,

    /// The time at which the account was created.
    pub(crate) joined_at: DateTime<Utc>,

    /// The avatar image URL.
    pub(crate) avatar_url: String,

    /// The public profile page URL.
    pub(crate) profile_url: String,
}

impl Profile {
    /// Retrieves the account login.
    pub fn login(&self) -> &str {
        &self.login
    }

    /// Retrieves the display name, falling back to the login.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.login)
    }

    /// Retrieves the biography, falling back to a placeholder text.
    pub fn bio(&self) -> &str {
        self.bio.as_deref().unwrap_or(FALLBACK_BIO)
    }

    /// Retrieves the number of followers.
    pub fn followers(&self) -> u32 {
        self.followers
    }

    /// Retrieves the number of accounts followed.
    pub fn following(&self) -> u32 {
        self.following
    }

    /// Retrieves the number of public repositories.
    pub fn public_repositories(&self) -> u32 {
        self.public_repositories
    }

    /// Retrieves the location, falling back to a placeholder text.
    pub fn location(&self) -> &str {
        self.location.as_deref().unwrap_or(FALLBACK_NOT_SPECIFIED)
    }

    /// Retrieves the website URL, falling back to a placeholder text.
    pub fn website_url(&self) -> &str {
        self.website_url.as_deref().unwrap_or(FALLBACK_NOT_AVAILABLE)
    }

    /// Retrieves the company, falling back to a placeholder text.
    pub fn company(&self) -> &str {
        self.company.as_deref().unwrap_or(FALLBACK_NOT_SPECIFIED)
    }

    /// Retrieves the time at which the account was created.
    pub fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    /// Retrieves the avatar image URL.
    pub fn avatar_url(&self) -> &str {
        &self.avatar_url
    }

    /// Retrieves the public profile page URL.
    pub fn profile_url(&self) -> &str {
        &self.profile_url
    }

    /// Creates a dummy `Profile` instance for testing purposes.
    #[cfg(test)]
    pub(crate) fn dummy() -> Self {
        Self {
            login: "octocat".to_string(),
            display_name: Some("The Octocat".to_string()),
            bio: None,
            followers: 3938,
            following: 9,
            public_repositories: 8,
            location: Some("San Francisco".to_string()),
            website_url: Some("https://github.blog".to_string()),
            company: Some("@github".to_string()),
            joined_at: DateTime::parse_from_rfc3339("2011-01-25T18:44:36Z")
                .unwrap()
                .with_timezone(&Utc),
            avatar_url: "https://avatars.githubusercontent.com/u/583231".to_string(),
            profile_url: "https://github.com/octocat".to_string(),
        }
    }
}

impl Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Profile: {}, Followers: {}, Public repositories: {}",
            self.login, self.followers, self.public_repositories
        )
    }
}

/// Metadata of one repository owned by the searched profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// The name of the repository.
    pub(crate) name: String,

    /// The repository page URL.
    pub(crate) url: String,

    /// Whether the repository is private.
    pub(crate) is_private: bool,

    /// The description, when the repository has one.
    pub(crate) description: Option<String>,

    /// The number of stars the repository has.
    pub(crate) stars: u32,

    /// The number of forks the repository has.
    pub(crate) forks: u32,

    /// The primary language, when one is detected.
    pub(crate) language: Option<String>,
}

impl Repository {
    /// Retrieves the repository name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Retrieves the repository page URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether the repository is private.
    pub fn is_private(&self) -> bool {
        self.is_private
    }

    /// Retrieves the description, when the repository has one.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Retrieves the number of stars.
    pub fn stars(&self) -> u32 {
        self.stars
    }

    /// Retrieves the number of forks.
    pub fn forks(&self) -> u32 {
        self.forks
    }

    /// Retrieves the primary language, when one is detected.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Creates a dummy `Repository` instance for testing purposes.
    #[cfg(test)]
    pub(crate) fn dummy(name: &str, stars: u32) -> Self {
        Self {
            name: name.to_string(),
            url: format!("https://github.com/octocat/{name}"),
            is_private: false,
            description: Some("A dummy repository".to_string()),
            stars,
            forks: 2,
            language: Some("Rust".to_string()),
        }
    }
}

impl Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Repository: {}, Stars: {}", self.name, self.stars)
    }
}
