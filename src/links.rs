use crate::error::{Result, StarCounterError};
use reqwest::header::{HeaderMap, LINK};
use url::Url;

/// A `(rel, url)` pair taken from a `Link` header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NavigationLink {
    pub relation: String,
    pub target: String,
}

impl NavigationLink {
    pub fn new(relation: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            target: target.into(),
        }
    }
}

/// Parse every `Link` header of a response.
///
/// GitHub sends one header shaped like
/// `<https://api.github.com/user/1/repos?per_page=2&page=2>; rel="next", <...&page=5>; rel="last"`.
/// Entries are split on commas only, so a URL that itself contains a comma is not supported.
pub fn parse_link_headers(headers: &HeaderMap) -> Result<Vec<NavigationLink>> {
    let mut links = Vec::new();

    for value in headers.get_all(LINK) {
        let value = value
            .to_str()
            .map_err(|e| StarCounterError::MalformedLink(format!("Link header is not ASCII: {}", e)))?;
        links.extend(parse_link_header(value)?);
    }

    Ok(links)
}

/// Parse a single `Link` header value.
pub fn parse_link_header(link_header: &str) -> Result<Vec<NavigationLink>> {
    link_header
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_link_entry)
        .collect()
}

fn parse_link_entry(entry: &str) -> Result<NavigationLink> {
    let (target, params) = entry
        .strip_prefix('<')
        .and_then(|rest| rest.split_once('>'))
        .ok_or_else(|| StarCounterError::MalformedLink(format!("missing <url> in '{}'", entry)))?;

    let relation = params
        .split(';')
        .map(str::trim)
        .find_map(|s| s.strip_prefix("rel="))
        .map(|rel| rel.trim_matches('"'))
        .filter(|rel| !rel.is_empty())
        .ok_or_else(|| StarCounterError::MalformedLink(format!("missing rel in '{}'", entry)))?;

    Ok(NavigationLink::new(relation, target))
}

/// Render links back into a `Link` header value.
pub fn format_link_header(links: &[NavigationLink]) -> String {
    links
        .iter()
        .map(|link| format!("<{}>; rel=\"{}\"", link.target, link.relation))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Point every link at `local_base`, keeping only the query of the original target.
///
/// Fails as a whole if any target cannot be parsed.
pub fn rewrite(links: &[NavigationLink], local_base: &str) -> Result<Vec<NavigationLink>> {
    links
        .iter()
        .map(|link| {
            let target = Url::parse(&link.target).map_err(|e| {
                StarCounterError::MalformedLink(format!("{} ({})", link.target, e))
            })?;
            let query = target.query().unwrap_or_default();
            Ok(NavigationLink::new(
                link.relation.clone(),
                format!("{}?{}", local_base, query),
            ))
        })
        .collect()
}
