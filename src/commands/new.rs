//! Create a new post

use anyhow::Result;
use chrono::Local;
use std::fs;
use std::path::PathBuf;

use crate::content::{FrontMatter, TagRegistry};
use crate::Blog;

/// Front-matter options for a new post
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    /// File stem; derived from the title when absent
    pub slug: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub series: Option<String>,
    pub draft: bool,
}

/// Write a new post file into the content directory and return its path
pub fn create_post(blog: &Blog, post: &NewPost) -> Result<PathBuf> {
    let now = Local::now();

    let slug = match &post.slug {
        Some(slug) => slug::slugify(slug),
        None => slug::slugify(&post.title),
    };
    let slug = if slug.is_empty() {
        format!("post-{}", now.format("%Y%m%d%H%M%S"))
    } else {
        slug
    };

    let registry = TagRegistry::new(blog.config.tags.iter().cloned());
    registry.check(&slug, &post.tags);

    let front_matter = FrontMatter {
        title: Some(post.title.clone()),
        description: Some(post.description.clone().unwrap_or_default()),
        date: Some(now.format("%Y-%m-%d %H:%M:%S").to_string()),
        tags: post.tags.clone(),
        thumbnail: None,
        series: post.series.clone(),
        draft: post.draft,
    };

    fs::create_dir_all(&blog.content_dir)?;
    let file_path = blog.content_dir.join(format!("{}.md", slug));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::write(&file_path, format!("{}\n", front_matter.to_block()?))?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
