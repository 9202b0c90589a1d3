mod common;

use common::{link_entry, repos_body, TestContext};
use github_star_counter::error::StarCounterError;
use github_star_counter::github::GitHubClient;
use github_star_counter::links::NavigationLink;
use github_star_counter::types::GitHubRepo;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_github_client_creation() {
    let client = GitHubClient::new("https://api.github.com", Duration::from_secs(30));
    assert!(client.is_ok());
}

#[tokio::test]
async fn test_invalid_base_url() {
    let result = GitHubClient::new("not a url", Duration::from_secs(30));
    assert!(matches!(result, Err(StarCounterError::InvalidUrl(_))));

    let result = GitHubClient::new("mailto:octocat@github.com", Duration::from_secs(30));
    assert!(matches!(result, Err(StarCounterError::ConfigError(_))));
}

#[tokio::test]
async fn test_fetch_page_parses_records_and_links() {
    let ctx = TestContext::new().await;
    let next = ctx.url("/user/42/repos?per_page=2&page=2");
    let last = ctx.url("/user/42/repos?per_page=2&page=5");

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("per_page", "2"))
        .and(header("Accept", "application/vnd.github.v3+json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(repos_body(&[("Hello-World", 1), ("Spoon-Knife", 2)]))
                .insert_header(
                    "Link",
                    format!("{}, {}", link_entry(&next, "next"), link_entry(&last, "last")).as_str(),
                ),
        )
        .expect(1)
        .mount(&ctx.github)
        .await;

    let page = ctx.client().fetch_page(&["users", "octocat", "repos"], "per_page=2").await
        .expect("Failed to fetch page");

    assert_eq!(
        page.records,
        vec![GitHubRepo::new("Hello-World", 1), GitHubRepo::new("Spoon-Knife", 2)]
    );
    assert_eq!(
        page.links,
        vec![NavigationLink::new("next", next), NavigationLink::new("last", last)]
    );
}

#[tokio::test]
async fn test_fetch_by_username_uses_fixed_page_size() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repos_body(&[("Hello-World", 7)])))
        .expect(1)
        .mount(&ctx.github)
        .await;

    let page = ctx.client().fetch_by_username("octocat", 100).await
        .expect("Failed to fetch page");

    assert_eq!(page.star_count(), 7);
    assert!(page.links.is_empty());
}

#[tokio::test]
async fn test_username_is_a_single_path_segment() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repos_body(&[])))
        .expect(1)
        .mount(&ctx.github)
        .await;

    ctx.client().fetch_by_username("octo/../cat", 100).await
        .expect("Failed to fetch page");

    let requests = ctx.github.received_requests().await.unwrap();
    assert_eq!(requests[0].url.path(), "/users/octo%2F..%2Fcat/repos");
}

#[tokio::test]
async fn test_remote_error_keeps_status_and_body() {
    let ctx = TestContext::new().await;
    let body = r#"{"message":"Not Found","documentation_url":"https://docs.github.com/rest"}"#;

    Mock::given(method("GET"))
        .and(path("/users/nobody/repos"))
        .respond_with(ResponseTemplate::new(404).set_body_string(body))
        .mount(&ctx.github)
        .await;

    let result = ctx.client().fetch_by_username("nobody", 100).await;

    match result {
        Err(StarCounterError::Remote { status, body: remote_body }) => {
            assert_eq!(status, 404);
            assert_eq!(remote_body, body);
        }
        other => panic!("Expected Remote error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&ctx.github)
        .await;

    let result = ctx.client().fetch_page(&["users", "octocat", "repos"], "").await;

    assert!(matches!(result, Err(StarCounterError::JsonError(_))));
}

#[tokio::test]
async fn test_malformed_link_header() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(repos_body(&[]))
                .insert_header("Link", "https://example.com/no-brackets; rel=\"next\""),
        )
        .mount(&ctx.github)
        .await;

    let result = ctx.client().fetch_page(&["users", "octocat", "repos"], "").await;

    assert!(matches!(result, Err(StarCounterError::MalformedLink(_))));
}

#[tokio::test]
async fn test_request_timeout() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(repos_body(&[]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&ctx.github)
        .await;

    let client = GitHubClient::new(&ctx.github.uri(), Duration::from_millis(200))
        .expect("Failed to create client");
    let result = client.fetch_by_username("octocat", 100).await;

    assert!(matches!(result, Err(StarCounterError::NetworkError(_))));
}
