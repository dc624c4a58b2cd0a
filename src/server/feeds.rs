//! Feed, sitemap, robots.txt and search index endpoints

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use super::{ApiError, AppState};
use crate::generator::{render_robots, render_rss, render_sitemap, search_index};

pub async fn rss(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let index = state.load_index().await?;
    let feed = render_rss(&state.blog.config, index.metas(), Utc::now());
    Ok((
        [
            (header::CONTENT_TYPE, "application/rss+xml; charset=utf-8".to_string()),
            (header::CACHE_CONTROL, state.cache_control()),
        ],
        feed,
    ))
}

pub async fn sitemap(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let index = state.load_index().await?;
    Ok((
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        render_sitemap(&state.blog.config, &index),
    ))
}

pub async fn robots(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_robots(&state.blog.config),
    )
}

pub async fn search_index_json(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let index = state.load_index().await?;
    serde_json::to_value(search_index(&index))
        .map(Json)
        .map_err(|e| ApiError::internal("Failed to build search index", e))
}
