use crate::github::API_BASE_URL;
use crate::pagination::COUNT_PAGE_SIZE;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "github-star-counter")]
#[command(about = "GitHub Star Counter - Lists a user's repositories and counts their stars")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind the HTTP server to
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = API_BASE_URL)]
    pub github_api_url: String,

    /// Public origin used in rewritten Link headers (defaults to the request's Host)
    ///
    /// Without it links are built as `http://<Host>`; set it when served behind HTTPS.
    #[arg(long, env = "PUBLIC_URL")]
    pub public_url: Option<String>,

    /// Timeout for each GitHub API request, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT", default_value_t = 30)]
    pub request_timeout: u64,

    /// Page size used when counting stars
    #[arg(long, env = "COUNT_PAGE_SIZE", default_value_t = COUNT_PAGE_SIZE)]
    pub count_page_size: u32,
}
