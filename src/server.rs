//! HTTP boundary of the application.
//!
//! A thin Axum layer over the story queries. Handlers translate request
//! parameters into query values, run them, and map failures onto status
//! codes. Validation problems become 400 responses carrying the validation
//! message and everything else becomes an opaque 500.

mod data;
mod error;

use anyhow::Context;
use axum::Router;
use axum::extract::{Query, State};
use axum::http::{HeaderValue, Method};
use axum::response::Json;
use axum::routing::get;
use tower_http::cors::CorsLayer;

pub use data::{StoriesParams, StoriesResponse};
pub use error::{ErrorBody, ServerError};

use crate::app::cache::StoryCache;
use crate::app::config::{Config, StrOpt, USizeOpt};
use crate::app::query::{QueryError, StoryQuery, top_stories};
use crate::log::Log;

const SCOPE: &str = "server";

/// Origin of the development frontend allowed through CORS
const ALLOWED_ORIGIN: &str = "http://localhost:4200";

/// Handles shared by every request
#[derive(Debug, Clone)]
pub struct AppState {
    pub cache: StoryCache,
    pub config: Config,
    pub log: Log,
}

/// Builds the application router.
///
/// Cross-origin reads are allowed for the development frontend only, and
/// only over `GET`.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_static(ALLOWED_ORIGIN))
        .allow_methods([Method::GET]);

    Router::new()
        .route("/stories", get(stories))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

/// Binds the configured address and serves requests until `ctrl-c` arrives.
///
/// # Errors
/// Fails if the address cannot be bound or the server loop errors out.
pub async fn serve(state: AppState) -> anyhow::Result<()> {
    let addr = state.config.str(StrOpt::ListenAddr).await;
    let log = state.log.clone();

    let listener = tokio::net::TcpListener::bind(addr.as_ref())
        .await
        .with_context(|| format!("Binding to {}", addr))?;
    log.info(format!("{SCOPE}: listening on http://{}", addr));

    let server = axum::serve(listener, router(state));
    tokio::select! {
        result = server => result.context("Serving HTTP requests"),
        _ = tokio::signal::ctrl_c() => {
            log.info(format!("{SCOPE}: shutdown signal received"));
            Ok(())
        }
    }
}

/// `GET /stories`
///
/// Serves one page of the cached top stories, optionally filtered by a
/// title search.
async fn stories(
    State(state): State<AppState>,
    Query(params): Query<StoriesParams>,
) -> Result<Json<StoriesResponse>, ServerError> {
    let default_page_size = state.config.usize(USizeOpt::DefaultPageSize).await as i64;
    let page_size = params.page_size.unwrap_or(default_page_size);
    let query = StoryQuery {
        search: params.search,
        page: params.page.unwrap_or(1),
        page_size,
    };

    match top_stories(&state.cache, &query).await {
        Ok(page) => {
            let total_pages = (page.total_matches as u64).div_ceil(page_size as u64);
            Ok(Json(StoriesResponse {
                stories: page.stories,
                total_pages,
            }))
        }
        Err(err @ QueryError::InvalidPageSize) => Err(ServerError::BadRequest(err.to_string())),
        Err(QueryError::Internal(cause)) => {
            state
                .log
                .error(format!("{SCOPE}: story listing failed: {:#}", cause));
            Err(ServerError::Internal)
        }
    }
}

/// `GET /health`
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
