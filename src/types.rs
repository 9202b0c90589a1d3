use serde::{Deserialize, Serialize};

// GitHub API response structures

/// One repository as listed by `GET /users/{username}/repos`. Every other field is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubRepo {
    pub name: String,
    pub stargazers_count: u64,
}

impl GitHubRepo {
    pub fn new(name: impl Into<String>, stargazers_count: u64) -> Self {
        Self {
            name: name.into(),
            stargazers_count,
        }
    }
}
