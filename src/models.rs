use crate::error::{Result, StarCounterError};
use crate::links::NavigationLink;
use crate::types::GitHubRepo;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One fetched page of repositories together with its navigation links.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub records: Vec<GitHubRepo>,
    pub links: Vec<NavigationLink>,
}

impl Page {
    pub fn new(records: Vec<GitHubRepo>, links: Vec<NavigationLink>) -> Self {
        Self { records, links }
    }

    pub fn link(&self, relation: &str) -> Option<&NavigationLink> {
        self.links.iter().find(|link| link.relation == relation)
    }

    pub fn next_link(&self) -> Option<&NavigationLink> {
        self.link("next")
    }

    pub fn star_count(&self) -> u64 {
        self.records.iter().map(|repo| repo.stargazers_count).sum()
    }
}

/// The only query parameters the listing endpoint forwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryParameters {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl QueryParameters {
    /// Validate raw query pairs. Any key other than `page` or `per_page` is rejected.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut params = QueryParameters::default();

        for (key, value) in pairs {
            match key {
                "page" => params.page = Some(parse_positive(key, value)?),
                "per_page" => params.per_page = Some(parse_positive(key, value)?),
                other => {
                    return Err(StarCounterError::Validation(format!(
                        "Unsupported query param: {}",
                        other
                    )));
                }
            }
        }

        Ok(params)
    }

    /// Serialize as a remote query string, e.g. `per_page=2&page=3`.
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        if let Some(per_page) = self.per_page {
            serializer.append_pair("per_page", &per_page.to_string());
        }
        if let Some(page) = self.page {
            serializer.append_pair("page", &page.to_string());
        }
        serializer.finish()
    }
}

impl TryFrom<&HashMap<String, String>> for QueryParameters {
    type Error = StarCounterError;

    fn try_from(map: &HashMap<String, String>) -> Result<Self> {
        Self::from_pairs(map.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

fn parse_positive(key: &str, value: &str) -> Result<u32> {
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(StarCounterError::Validation(format!(
            "Query param {} must be a positive integer, got '{}'",
            key, value
        ))),
    }
}

/// Response body of the count endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarCount {
    pub username: String,
    pub star_count: u64,
}
