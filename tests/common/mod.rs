#![allow(dead_code)]

use github_star_counter::github::GitHubClient;
use github_star_counter::pagination::PaginationWalker;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::MockServer;

pub struct TestContext {
    pub github: MockServer,
}

impl TestContext {
    pub async fn new() -> Self {
        TestContext {
            github: MockServer::start().await,
        }
    }

    pub fn client(&self) -> GitHubClient {
        GitHubClient::new(&self.github.uri(), Duration::from_secs(5))
            .expect("Failed to create client")
    }

    pub fn walker(&self) -> PaginationWalker {
        PaginationWalker::new(self.client())
    }

    /// Absolute URL on the mock GitHub server.
    pub fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.github.uri(), path_and_query)
    }
}

/// Repository list body as GitHub returns it, with fields the service ignores.
pub fn repos_body(repos: &[(&str, u64)]) -> Value {
    Value::Array(
        repos
            .iter()
            .map(|(name, stars)| {
                json!({
                    "id": 1296269,
                    "name": name,
                    "full_name": format!("octocat/{}", name),
                    "private": false,
                    "owner": { "login": "octocat" },
                    "stargazers_count": stars,
                    "forks_count": 9,
                })
            })
            .collect(),
    )
}

pub fn link_entry(url: &str, rel: &str) -> String {
    format!("<{}>; rel=\"{}\"", url, rel)
}
