//! In-memory post index and the views derived from it

use anyhow::Result;
use std::collections::HashMap;

use super::loader::ContentLoader;
use super::{Post, PostMeta, TagCount};
use crate::Blog;

/// Maximum number of search hits returned
const SEARCH_LIMIT: usize = 10;

/// Visible posts sorted newest first. Rebuilt from disk on every [`PostIndex::load`].
#[derive(Debug, Clone, Default)]
pub struct PostIndex {
    posts: Vec<Post>,
}

impl PostIndex {
    /// Read the content directory and build the index
    pub fn load(blog: &Blog) -> Result<Self> {
        let posts = ContentLoader::new(blog).load_posts()?;
        tracing::debug!("Indexed {} posts", posts.len());
        Ok(Self { posts })
    }

    /// Build from posts that are already sorted newest first
    pub fn from_sorted(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    /// All visible posts, newest first
    pub fn all_posts(&self) -> &[Post] {
        &self.posts
    }

    /// Metadata of all visible posts, newest first
    pub fn metas(&self) -> impl Iterator<Item = &PostMeta> {
        self.posts.iter().map(|p| &p.meta)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn post_by_slug(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// The `n` newest posts
    pub fn recent_posts(&self, n: usize) -> &[Post] {
        &self.posts[..n.min(self.posts.len())]
    }

    pub fn posts_by_tag(&self, tag: &str) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.has_tag(tag)).collect()
    }

    pub fn posts_by_category(&self, category: &str) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.category == category).collect()
    }

    /// Distinct categories, sorted by name
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.posts.iter().map(|p| p.category.as_str()).collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    /// Tag usage counts, most used first, then by name
    pub fn all_tags(&self) -> Vec<TagCount> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for post in &self.posts {
            for tag in &post.tags {
                *counts.entry(tag.as_str()).or_insert(0) += 1;
            }
        }

        let mut tags: Vec<TagCount> = counts
            .into_iter()
            .map(|(tag, count)| TagCount {
                tag: tag.to_string(),
                count,
            })
            .collect();
        tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
        tags
    }

    /// Case-insensitive match on title, description or tags
    pub fn search(&self, query: &str) -> Vec<&Post> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return Vec::new();
        }

        self.posts
            .iter()
            .filter(|p| {
                p.title.to_lowercase().contains(&q)
                    || p.description.to_lowercase().contains(&q)
                    || p.tags.iter().any(|t| t.to_lowercase().contains(&q))
            })
            .take(SEARCH_LIMIT)
            .collect()
    }
}
