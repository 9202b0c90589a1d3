use crate::error::{Result, StarCounterError};
use crate::health::{health_check, liveness_check};
use crate::links::{format_link_header, rewrite};
use crate::models::StarCount;
use crate::pagination::PaginationWalker;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use url::Url;

pub const LIST_PATH: &str = "/list";
pub const COUNT_PATH: &str = "/count";

const LIST_SEGMENT: &str = "list";

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub walker: PaginationWalker,
    pub public_url: Option<Arc<str>>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(walker: PaginationWalker, public_url: Option<String>) -> Self {
        Self {
            walker,
            public_url: public_url.map(|url| Arc::from(url.trim_end_matches('/'))),
            start_time: Instant::now(),
        }
    }

    /// Origin that rewritten links point at.
    fn origin(&self, headers: &HeaderMap) -> String {
        if let Some(public_url) = &self.public_url {
            return public_url.to_string();
        }

        let host = headers
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .unwrap_or("localhost");
        format!("http://{}", host)
    }

    /// `<origin>/list/<username>` with the username encoded as a single path segment.
    ///
    /// Commas are escaped as well so the `Link` header still splits into the same entries.
    fn list_base(&self, headers: &HeaderMap, username: &str) -> Result<String> {
        let mut url = Url::parse(&self.origin(headers))?;
        url.path_segments_mut()
            .map_err(|_| StarCounterError::ConfigError("Public URL cannot be used as a base".to_string()))?
            .pop_if_empty()
            .push(LIST_SEGMENT)
            .push(username);
        url.set_query(None);
        url.set_fragment(None);
        Ok(url.as_str().replace(',', "%2C"))
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for StarCounterError {
    fn into_response(self) -> Response {
        match self {
            StarCounterError::Remote { status, body } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                let content_type = if serde_json::from_str::<IgnoredAny>(&body).is_ok() {
                    "application/json"
                } else {
                    "text/plain; charset=utf-8"
                };
                (status, [(header::CONTENT_TYPE, content_type)], body).into_response()
            }
            StarCounterError::Validation(message) => (
                StatusCode::FORBIDDEN,
                Json(ErrorResponse { error: message }),
            )
                .into_response(),
            other => {
                error!("Request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: other.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(&format!("{}/:username", LIST_PATH), get(list_user_repos))
        .route(&format!("{}/:username", COUNT_PATH), get(count_user_stars))
        .route("/health", get(health_check))
        .route("/livez", get(liveness_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl+C.
pub async fn start_server(state: AppState, addr: &str) -> Result<()> {
    let app = create_router(state);
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down server...");
}

/// One page of a user's repositories, with navigation links pointing back at this service.
async fn list_user_repos(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Response> {
    let page = state.walker.list_one_page(&username, &query).await?;

    let local_base = state.list_base(&headers, &username)?;
    let links = rewrite(&page.links, &local_base)?;

    let mut response = Json(page.records).into_response();
    if !links.is_empty() {
        let value = HeaderValue::from_str(&format_link_header(&links))
            .map_err(|e| StarCounterError::MalformedLink(e.to_string()))?;
        response.headers_mut().insert(header::LINK, value);
    }

    Ok(response)
}

/// Total stars over all of a user's repositories.
async fn count_user_stars(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<StarCount>> {
    let star_count = state.walker.sum_popularity(&username).await?;
    Ok(Json(StarCount {
        username,
        star_count,
    }))
}
