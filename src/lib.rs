//! blog-rs: content index and view-ranking backend for a markdown blog
//!
//! Posts are markdown/MDX files with YAML front-matter. They are indexed in
//! memory on demand and served, together with page-view counts and
//! popularity rankings, through a small HTTP API. Feeds, the sitemap and the
//! search index can also be written out as static files.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod views;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use views::{JsonlViewStore, MemoryViewStore, ViewStore};

/// A blog site rooted at a directory
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content (posts) directory
    pub content_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Guide documents directory
    pub guide_dir: PathBuf,
}

impl Blog {
    /// Open a site directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env_overrides()?;

        Ok(Self::with_config(base_dir, config))
    }

    /// Use an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let guide_dir = base_dir.join(&config.guide_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
            guide_dir,
        }
    }

    /// Location of the JSONL view log
    pub fn views_path(&self) -> PathBuf {
        self.base_dir.join(&self.config.views.data_file)
    }

    /// Open the configured view store
    pub async fn open_view_store(&self) -> Result<Arc<dyn ViewStore>> {
        let store: Arc<dyn ViewStore> = match self.config.views.backend {
            config::ViewBackend::File => Arc::new(JsonlViewStore::open(self.views_path()).await?),
            config::ViewBackend::Memory => {
                tracing::warn!("Using in-memory view store; views are lost on restart");
                Arc::new(MemoryViewStore::new())
            }
        };
        Ok(store)
    }

    /// Build the post index from disk
    pub fn index(&self) -> Result<content::PostIndex> {
        content::PostIndex::load(self)
    }

    /// Write feeds, sitemap and search index to the public directory
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_blog_paths() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("_config.yml"),
            "content_dir: posts\nviews:\n  data_file: var/views.jsonl\n",
        )
        .unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.content_dir, dir.path().join("posts"));
        assert_eq!(blog.public_dir, dir.path().join("public"));
        assert_eq!(blog.guide_dir, dir.path().join("public/ai"));
        assert_eq!(blog.views_path(), dir.path().join("var/views.jsonl"));
    }

    #[test]
    fn test_blog_without_config() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.config.feed_limit, 20);
        assert_eq!(blog.content_dir, dir.path().join("content"));
    }
}
