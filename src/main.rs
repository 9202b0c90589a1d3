use anyhow::Context;
use clap::Parser;
use colored::*;
use github_star_counter::cli::Cli;
use github_star_counter::github::GitHubClient;
use github_star_counter::pagination::PaginationWalker;
use github_star_counter::server::{ start_server, AppState };
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    println!("{}", "GitHub Star Counter".bold().green());
    println!("{}\n", "=".repeat(50).dimmed());

    let client = GitHubClient::new(
        &cli.github_api_url,
        Duration::from_secs(cli.request_timeout)
    ).context("Failed to create GitHub client")?;

    println!("✅ Using GitHub API at {}", client.base_url());

    let walker = PaginationWalker::with_page_size(client, cli.count_page_size);
    let state = AppState::new(walker, cli.public_url.clone());

    let addr = format!("{}:{}", cli.host, cli.port);
    println!("📡 Serving /list/{{username}} and /count/{{username}} on {}", addr);
    println!("\nPress Ctrl+C to stop the server\n");

    start_server(state, &addr).await.context("Server failed")?;

    println!("✅ Server stopped");
    Ok(())
}
