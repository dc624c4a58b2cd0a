//! Generator module - writes feeds, sitemap and the search index as static files

mod feed;
mod sitemap;

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use std::fs;

use crate::content::{PostIndex, PostMeta};
use crate::Blog;

pub use feed::render_rss;
pub use sitemap::{render_robots, render_sitemap};

/// One entry of `search.json`
#[derive(Debug, Clone, Serialize)]
pub struct SearchEntry<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub description: &'a str,
    pub tags: &'a [String],
    pub date: String,
}

impl<'a> From<&'a PostMeta> for SearchEntry<'a> {
    fn from(post: &'a PostMeta) -> Self {
        Self {
            title: &post.title,
            slug: &post.slug,
            description: &post.description,
            tags: &post.tags,
            date: post.date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Search index entries for every visible post, newest first
pub fn search_index(index: &PostIndex) -> Vec<SearchEntry<'_>> {
    index.metas().map(SearchEntry::from).collect()
}

/// Static file generator
pub struct Generator {
    blog: Blog,
}

impl Generator {
    pub fn new(blog: &Blog) -> Self {
        Self { blog: blog.clone() }
    }

    /// Write everything into the public directory
    pub fn generate(&self, index: &PostIndex) -> Result<()> {
        fs::create_dir_all(&self.blog.public_dir)?;

        self.generate_feed(index)?;
        self.generate_sitemap(index)?;
        self.generate_robots()?;
        self.generate_search_index(index)?;

        Ok(())
    }

    fn generate_feed(&self, index: &PostIndex) -> Result<()> {
        let feed = render_rss(&self.blog.config, index.metas(), Utc::now());
        fs::write(self.blog.public_dir.join("feed.xml"), feed)?;
        tracing::info!("Generated feed.xml");
        Ok(())
    }

    fn generate_sitemap(&self, index: &PostIndex) -> Result<()> {
        let sitemap = render_sitemap(&self.blog.config, index);
        fs::write(self.blog.public_dir.join("sitemap.xml"), sitemap)?;
        tracing::info!("Generated sitemap.xml");
        Ok(())
    }

    fn generate_robots(&self) -> Result<()> {
        fs::write(
            self.blog.public_dir.join("robots.txt"),
            render_robots(&self.blog.config),
        )?;
        tracing::info!("Generated robots.txt");
        Ok(())
    }

    fn generate_search_index(&self, index: &PostIndex) -> Result<()> {
        let json = serde_json::to_string_pretty(&search_index(index))?;
        fs::write(self.blog.public_dir.join("search.json"), json)?;
        tracing::info!("Generated search.json");
        Ok(())
    }
}
