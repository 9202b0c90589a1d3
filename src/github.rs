use crate::error::{Result, StarCounterError};
use crate::links::parse_link_headers;
use crate::models::Page;
use crate::types::GitHubRepo;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const API_BASE_URL: &str = "https://api.github.com";

/// Unauthenticated client for the GitHub REST API rooted at a fixed base URL.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: Url,
}

impl GitHubClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("GitHub Star Counter/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(StarCounterError::ConfigError(format!(
                "GitHub API URL cannot be used as a base: {}",
                base_url
            )));
        }

        Ok(GitHubClient { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn make_request(&self, url: &str) -> Result<Response> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!("GitHub API request {} failed with status {}", url, status);
        Err(StarCounterError::Remote {
            status: status.as_u16(),
            body,
        })
    }

    /// Fetch `<base>/<segments...>?<query>` as one page of repositories.
    ///
    /// Each segment is percent-encoded on its own, so a `/` inside one stays in that segment.
    pub async fn fetch_page(&self, segments: &[&str], query: &str) -> Result<Page> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StarCounterError::ConfigError(format!("Invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        url.set_query(Some(query).filter(|q| !q.is_empty()));

        self.fetch_url(url.as_str()).await
    }

    /// Fetch an absolute URL, typically a `next` link handed out by the API.
    pub async fn fetch_url(&self, url: &str) -> Result<Page> {
        let response = self.make_request(url).await?;
        let links = parse_link_headers(response.headers())?;
        let body = response.text().await?;
        let records: Vec<GitHubRepo> = serde_json::from_str(&body)?;

        debug!("Fetched {} repositories and {} links from {}", records.len(), links.len(), url);
        Ok(Page::new(records, links))
    }

    /// First page of a user's repositories with a fixed page size.
    pub async fn fetch_by_username(&self, username: &str, per_page: u32) -> Result<Page> {
        self.fetch_page(&user_repos_path(username), &format!("per_page={}", per_page))
            .await
    }
}

pub fn user_repos_path(username: &str) -> [&str; 3] {
    ["users", username, "repos"]
}
