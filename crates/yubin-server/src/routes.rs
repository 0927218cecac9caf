use std::sync::Arc;

use axum::Router;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, RawQuery, State};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tower_http::services::{ServeDir, ServeFile};

use crate::dto::{Relay, SearchParams};
use yubin_core::AppError;

use crate::error::ApiError;
use crate::middleware::{api_cors, only_get};
use crate::state::AppState;

/// Build the full router: the `/api` proxy, the static front-end as
/// fallback, and the method/CORS middleware around both.
pub fn router(state: Arc<AppState>) -> Router {
    // Unknown paths get index.html; a missing index.html is a 404.
    let frontend = ServeDir::new(&state.frontend_dir)
        .fallback(ServeFile::new(state.frontend_dir.join("index.html")));

    Router::new()
        .route("/api", get(search))
        .route("/api/", get(search))
        .route("/api/{*search_path}", get(search_path))
        .fallback_service(frontend)
        .layer(middleware::from_fn(only_get))
        .layer(middleware::from_fn(api_cors))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// `GET /api?search_code=...`
pub async fn search(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
) -> Result<Response, ApiError> {
    let params = SearchParams::from_query(raw.as_deref());
    forward(&state, params.search_code.unwrap_or_default()).await
}

/// `GET /api/{search_path}`. The query parameter still wins when present.
pub async fn search_path(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
    search_path: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let query = match SearchParams::from_query(raw.as_deref()).search_code {
        Some(query) => query,
        None => {
            let Path(search_path) =
                search_path.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
            search_path
                .strip_prefix('/')
                .unwrap_or(&search_path)
                .to_string()
        }
    };

    forward(&state, query).await
}

async fn forward(state: &AppState, query: String) -> Result<Response, ApiError> {
    let response = state.proxy.search(&query).await?;
    Ok(Relay(response).into_response())
}
