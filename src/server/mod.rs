//! HTTP API server

mod api;
mod error;
mod feeds;
mod guide;
mod views;

use anyhow::Result;
use axum::http::HeaderMap;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::content::PostIndex;
use crate::views::ViewService;
use crate::Blog;

pub use error::ApiError;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub blog: Arc<Blog>,
    pub views: ViewService,
}

impl AppState {
    pub fn new(blog: Blog, views: ViewService) -> Self {
        Self {
            blog: Arc::new(blog),
            views,
        }
    }

    /// Rebuild the post index from disk on the blocking pool
    pub async fn load_index(&self) -> Result<PostIndex, ApiError> {
        let blog = self.blog.clone();
        tokio::task::spawn_blocking(move || PostIndex::load(&blog))
            .await
            .map_err(|e| ApiError::internal("Failed to load posts", e))?
            .map_err(|e| ApiError::internal("Failed to load posts", e))
    }

    /// `Cache-Control` value for cacheable responses
    pub fn cache_control(&self) -> String {
        format!(
            "public, s-maxage={}, stale-while-revalidate={}",
            self.blog.config.views.rankings_max_age, self.blog.config.views.rankings_stale
        )
    }
}

/// Build the router with every endpoint
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/views", get(views::view_count).post(views::record_view))
        .route("/api/rankings", get(views::rankings))
        .route("/api/posts", get(api::list_posts))
        .route("/api/posts/:slug", get(api::get_post))
        .route("/api/tags", get(api::list_tags))
        .route("/api/tags/:tag", get(api::posts_by_tag))
        .route("/api/categories", get(api::list_categories))
        .route("/api/categories/:category", get(api::posts_by_category))
        .route("/api/search", get(api::search))
        .route("/api/guide", get(guide::list_guides))
        .route("/api/guide/:slug", get(guide::get_guide))
        .route("/feed.xml", get(feeds::rss))
        .route("/sitemap.xml", get(feeds::sitemap))
        .route("/robots.txt", get(feeds::robots))
        .route("/search.json", get(feeds::search_index_json))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Address of the requesting client as reported by the proxy headers
pub fn client_ip(headers: &HeaderMap) -> String {
    fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    if let Some(first) = header(headers, "x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return first.to_string();
    }
    header(headers, "x-real-ip").unwrap_or("unknown").to_string()
}

/// Start the API server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let store = blog.open_view_store().await?;
    let views = ViewService::new(store, &blog.config)?;
    let app = router(AppState::new(blog.clone(), views));

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
