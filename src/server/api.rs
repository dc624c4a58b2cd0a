//! Post, tag and search endpoints

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::{ApiError, AppState};
use crate::content::{
    prioritize_tag, related_posts, series_navigation, Post, PostMeta, SeriesNavigation, TagCount,
};
use crate::helpers::{article_json_ld, extract_toc, og_image_url, TocItem};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PostQuery {
    /// Tag page the reader came from
    from: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

/// Everything needed to show one post
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail<'a> {
    post: &'a Post,
    toc: Vec<TocItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    series: Option<SeriesNavigation<'a>>,
    related: Vec<&'a PostMeta>,
    og_image: String,
    json_ld: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct TagPosts<'a> {
    tag: &'a str,
    posts: Vec<&'a PostMeta>,
}

#[derive(Debug, Serialize)]
pub struct CategoryPosts<'a> {
    category: &'a str,
    posts: Vec<&'a PostMeta>,
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<PostMeta>>, ApiError> {
    let index = state.load_index().await?;
    let posts = match query.limit {
        Some(n) => index.recent_posts(n),
        None => index.all_posts(),
    };
    Ok(Json(posts.iter().map(|p| p.meta.clone()).collect()))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<PostQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let index = state.load_index().await?;
    let config = &state.blog.config;
    let post = index
        .post_by_slug(&slug)
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    let mut related = related_posts(&index, post, config.related_count);
    if let Some(tag) = query.from.as_deref().filter(|t| !t.is_empty()) {
        related = prioritize_tag(related, tag);
    }
    related.truncate(config.related_display);

    let detail = PostDetail {
        post,
        toc: extract_toc(&post.content),
        series: series_navigation(&index, post),
        related,
        og_image: og_image_url(config, post),
        json_ld: article_json_ld(config, post),
    };

    serde_json::to_value(&detail)
        .map(Json)
        .map_err(|e| ApiError::internal("Failed to render post", e))
}

pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<TagCount>>, ApiError> {
    let index = state.load_index().await?;
    Ok(Json(index.all_tags()))
}

pub async fn posts_by_tag(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let index = state.load_index().await?;
    let posts: Vec<&PostMeta> = index.posts_by_tag(&tag).into_iter().map(|p| &p.meta).collect();
    if posts.is_empty() {
        return Err(ApiError::not_found("Tag not found"));
    }

    serde_json::to_value(TagPosts { tag: &tag, posts })
        .map(Json)
        .map_err(|e| ApiError::internal("Failed to render tag", e))
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, ApiError> {
    let index = state.load_index().await?;
    Ok(Json(
        index.categories().into_iter().map(str::to_string).collect(),
    ))
}

pub async fn posts_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let index = state.load_index().await?;
    let posts: Vec<&PostMeta> = index
        .posts_by_category(&category)
        .into_iter()
        .map(|p| &p.meta)
        .collect();
    if posts.is_empty() {
        return Err(ApiError::not_found("Category not found"));
    }

    serde_json::to_value(CategoryPosts {
        category: &category,
        posts,
    })
    .map(Json)
    .map_err(|e| ApiError::internal("Failed to render category", e))
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<PostMeta>>, ApiError> {
    let index = state.load_index().await?;
    Ok(Json(
        index.search(&query.q).into_iter().map(|p| p.meta.clone()).collect(),
    ))
}
