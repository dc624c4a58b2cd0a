//! Plain-text writing guides for external tools

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use std::io::ErrorKind;

use super::{ApiError, AppState};
use crate::helpers::full_url_for;

const TEXT_HEADERS: [(header::HeaderName, &str); 2] = [
    (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
];

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, TEXT_HEADERS, "Not Found").into_response()
}

pub async fn list_guides(State(state): State<AppState>) -> impl IntoResponse {
    let config = &state.blog.config;
    let base = full_url_for(config, "api/guide");

    let mut body = format!("# Writing Guide - {}\n\n## Documents\n", config.title);
    for doc in &config.guides {
        body.push_str(&format!("- {}: {}/{}\n", doc.title, base, doc.slug));
    }

    (TEXT_HEADERS, body)
}

pub async fn get_guide(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, ApiError> {
    if !state.blog.config.guides.iter().any(|doc| doc.slug == slug) {
        return Ok(not_found());
    }

    let path = state.blog.guide_dir.join(format!("{}.md", slug));
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => Ok((TEXT_HEADERS, content).into_response()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(not_found()),
        Err(e) => Err(ApiError::internal("Failed to read guide", e)),
    }
}
