//! Post models

use chrono::{DateTime, Local};
use serde::Serialize;

/// Category of posts placed directly in the content root
pub const UNCATEGORIZED: &str = "uncategorized";

/// Metadata of a blog post, everything except the body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMeta {
    /// File stem of the source file
    pub slug: String,

    /// Content sub-folder, `uncategorized` for top-level files
    pub category: String,

    pub title: String,

    pub description: String,

    /// Publication date
    pub date: DateTime<Local>,

    /// Tags in front-matter order
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    /// e.g. "3 min read"
    pub reading_time: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_order: Option<u32>,

    pub draft: bool,
}

impl PostMeta {
    /// Whether the post carries `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Both posts belong to the same named series
    pub fn same_series(&self, other: &PostMeta) -> bool {
        match (&self.series, &other.series) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// A blog post with its raw markdown body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    #[serde(flatten)]
    pub meta: PostMeta,

    /// Raw markdown/MDX, unrendered
    pub content: String,
}

impl std::ops::Deref for Post {
    type Target = PostMeta;

    fn deref(&self) -> &PostMeta {
        &self.meta
    }
}

/// A tag with the number of posts carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}
