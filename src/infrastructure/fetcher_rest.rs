use anyhow::Context;
use chrono::{DateTime, Utc};
use log::debug;
use reqwest::{
    Client, StatusCode,
    header::{HeaderMap, HeaderValue},
};
use serde::Deserialize;

use crate::{
    Profile, ProfileEnvelope, ProfileFetcher, RateLimitSnapshot, Repository, SearchError,
    StdResult, Username,
};

/// The REST production endpoint for GitHub.
pub const GITHUB_REST_ENDPOINT: &str = "https://api.github.com";

/// The number of repositories requested per search.
pub const REPOSITORIES_PER_SEARCH: u8 = 6;

const RATE_REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RATE_RESET_HEADER: &str = "x-ratelimit-reset";

/// The wire shape of a profile returned by `GET /users/{login}`.
#[derive(Deserialize, Debug)]
struct ProfileDto {
    login: String,
    name: Option<String>,
    bio: Option<String>,
    followers: u32,
    following: u32,
    public_repos: u32,
    location: Option<String>,
    blog: Option<String>,
    company: Option<String>,
    created_at: String,
    avatar_url: String,
    html_url: String,
}

impl TryFrom<ProfileDto> for Profile {
    type Error = SearchError;

    fn try_from(dto: ProfileDto) -> Result<Self, Self::Error> {
        let joined_at = DateTime::parse_from_rfc3339(&dto.created_at)
            .map_err(|e| SearchError::FetchFailed(format!("invalid created_at timestamp: {e}")))?
            .with_timezone(&Utc);

        Ok(Self {
            login: dto.login,
            display_name: dto.name,
            bio: dto.bio,
            followers: dto.followers,
            following: dto.following,
            public_repositories: dto.public_repos,
            location: dto.location,
            // The API reports an unset website as an empty string, not null.
            website_url: dto.blog.filter(|blog| !blog.is_empty()),
            company: dto.company,
            joined_at,
            avatar_url: dto.avatar_url,
            profile_url: dto.html_url,
        })
    }
}

/// The wire shape of a repository returned by `GET /users/{login}/repos`.
#[derive(Deserialize, Debug)]
struct RepositoryDto {
    name: String,
    html_url: String,
    private: bool,
    description: Option<String>,
    stargazers_count: u32,
    forks_count: u32,
    language: Option<String>,
}

impl From<RepositoryDto> for Repository {
    fn from(dto: RepositoryDto) -> Self {
        Self {
            name: dto.name,
            url: dto.html_url,
            is_private: dto.private,
            description: dto.description,
            stars: dto.stargazers_count,
            forks: dto.forks_count,
            language: dto.language,
        }
    }
}

fn rate_limit_from_headers(headers: &HeaderMap) -> Option<RateLimitSnapshot> {
    let remaining = headers
        .get(RATE_REMAINING_HEADER)?
        .to_str()
        .ok()?
        .parse::<u32>()
        .ok()?;
    let reset_epoch = headers
        .get(RATE_RESET_HEADER)?
        .to_str()
        .ok()?
        .parse::<i64>()
        .ok()?;
    let resets_at = DateTime::from_timestamp(reset_epoch, 0)?;

    Some(RateLimitSnapshot::new(remaining, resets_at))
}

fn profile_error_for_status(
    status: StatusCode,
    username: &Username,
    headers: &HeaderMap,
) -> SearchError {
    match status {
        StatusCode::NOT_FOUND => SearchError::UserNotFound(username.to_string()),
        StatusCode::FORBIDDEN => SearchError::RateLimited {
            resets_at: rate_limit_from_headers(headers).map(|snapshot| snapshot.resets_at()),
        },
        status => SearchError::FetchFailed(format!("unexpected status {status}")),
    }
}

/// Fetches profile data from the GitHub REST API.
pub struct RestFetcher {
    client: Client,
    endpoint: String,
}

impl RestFetcher {
    /// Creates a new `RestFetcher` against the given endpoint.
    pub fn try_new(endpoint: &str) -> StdResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("User-Agent", HeaderValue::from_static("github-finder"));
        headers.insert(
            "Accept",
            HeaderValue::from_static("application/vnd.github+json"),
        );
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build the HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, SearchError> {
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::FetchFailed(format!("transport error: {e}")))
    }
}

#[async_trait::async_trait]
impl ProfileFetcher for RestFetcher {
    async fn fetch_profile(&self, username: &Username) -> Result<ProfileEnvelope, SearchError> {
        let url = format!("{}/users/{username}", self.endpoint);
        let response = self.get(&url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(profile_error_for_status(status, username, response.headers()));
        }

        let rate_limit = rate_limit_from_headers(response.headers());
        debug!("Profile response for {username}: status={status}, rate_limit={rate_limit:?}");
        let dto = response
            .json::<ProfileDto>()
            .await
            .map_err(|e| SearchError::FetchFailed(format!("unreadable profile payload: {e}")))?;

        Ok(ProfileEnvelope::new(Profile::try_from(dto)?, rate_limit))
    }

    async fn fetch_repositories(
        &self,
        username: &Username,
    ) -> Result<Vec<Repository>, SearchError> {
        let url = format!(
            "{}/users/{username}/repos?sort=updated&per_page={REPOSITORIES_PER_SEARCH}",
            self.endpoint
        );
        let response = self.get(&url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::FetchFailed(format!(
                "unexpected status {status}"
            )));
        }

        let dtos = response
            .json::<Vec<RepositoryDto>>()
            .await
            .map_err(|e| SearchError::FetchFailed(format!("unreadable repository payload: {e}")))?;

        Ok(dtos.into_iter().map(Repository::from).collect())
    }
}
