use crate::error::Result;
use crate::github::{user_repos_path, GitHubClient};
use crate::models::{Page, QueryParameters};
use std::collections::HashMap;
use tracing::{debug, info};

/// GitHub caps `per_page` at 100.
pub const COUNT_PAGE_SIZE: u32 = 100;

/// Walks GitHub's paginated repository listing for a user.
#[derive(Debug, Clone)]
pub struct PaginationWalker {
    client: GitHubClient,
    count_page_size: u32,
}

impl PaginationWalker {
    pub fn new(client: GitHubClient) -> Self {
        Self::with_page_size(client, COUNT_PAGE_SIZE)
    }

    pub fn with_page_size(client: GitHubClient, count_page_size: u32) -> Self {
        Self {
            client,
            count_page_size,
        }
    }

    pub fn client(&self) -> &GitHubClient {
        &self.client
    }

    /// Fetch the single page selected by `query`. Links are returned as GitHub sent them.
    ///
    /// The query is validated before any request is made.
    pub async fn list_one_page(&self, username: &str, query: &HashMap<String, String>) -> Result<Page> {
        let params = QueryParameters::try_from(query)?;
        self.list_page(username, params).await
    }

    pub async fn list_page(&self, username: &str, params: QueryParameters) -> Result<Page> {
        self.client
            .fetch_page(&user_repos_path(username), &params.to_query_string())
            .await
    }

    /// Sum `stargazers_count` over every repository of `username`.
    ///
    /// Follows `next` links verbatim until a page has none. Any failed fetch aborts the
    /// whole walk and the partial total is dropped.
    pub async fn sum_popularity(&self, username: &str) -> Result<u64> {
        let mut page = self
            .client
            .fetch_by_username(username, self.count_page_size)
            .await?;
        let mut total = page.star_count();
        let mut pages = 1;

        while let Some(next) = page.next_link().map(|link| link.target.clone()) {
            debug!("Following next link {} for {}", next, username);
            page = self.client.fetch_url(&next).await?;
            total += page.star_count();
            pages += 1;
        }

        info!("Counted {} stars for {} across {} pages", total, username, pages);
        Ok(total)
    }
}
