//! Content loader - reads posts from the content directory

use anyhow::{Context, Result};
use chrono::Local;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::reading_time::reading_time;
use super::series::extract_series;
use super::{FrontMatter, Post, PostMeta, TagRegistry, UNCATEGORIZED};
use crate::Blog;

/// Loads posts from the content directory
pub struct ContentLoader<'a> {
    blog: &'a Blog,
    registry: TagRegistry,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(blog: &'a Blog) -> Self {
        let registry = TagRegistry::new(blog.config.tags.iter().cloned());
        Self { blog, registry }
    }

    /// Load every visible post, newest first.
    ///
    /// Drafts are skipped unless the blog runs in development. Posts with equal
    /// dates keep file-name order.
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let mut posts = Vec::new();
        let mut seen = HashSet::new();

        for path in self.markdown_files() {
            match self.load_file(&path) {
                Ok(post) => {
                    if post.draft && !self.blog.config.show_drafts() {
                        tracing::debug!("Skipping draft {}", post.slug);
                        continue;
                    }
                    if !seen.insert(post.slug.clone()) {
                        tracing::warn!("Duplicate slug {} at {:?}", post.slug, path);
                    }
                    posts.push(post);
                }
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {:#}", path, e);
                }
            }
        }

        // Stable: ties stay in walk order
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(posts)
    }

    /// Load a single post by slug, reading only its own file.
    ///
    /// `None` when no file has that stem, or the post is a draft outside development.
    pub fn load_post(&self, slug: &str) -> Result<Option<Post>> {
        let Some(path) = self.find_source(slug) else {
            return Ok(None);
        };

        let post = self.load_file(&path)?;
        if post.draft && !self.blog.config.show_drafts() {
            return Ok(None);
        }
        Ok(Some(post))
    }

    /// `.md` wins over `.mdx` when both exist
    fn find_source(&self, slug: &str) -> Option<PathBuf> {
        let mut candidates: Vec<PathBuf> = self
            .markdown_files()
            .into_iter()
            .filter(|p| file_stem(p) == Some(slug))
            .collect();
        candidates.sort_by_key(|p| p.extension().map(|e| e != "md"));
        candidates.into_iter().next()
    }

    fn markdown_files(&self) -> Vec<PathBuf> {
        let content_dir = &self.blog.content_dir;
        if !content_dir.exists() {
            tracing::debug!("Content directory {:?} does not exist", content_dir);
            return Vec::new();
        }

        WalkDir::new(content_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|p| p.is_file() && is_markdown_file(p))
            .collect()
    }

    fn category_of(&self, path: &Path) -> String {
        category_path(&self.blog.content_dir, path)
    }

    /// Parse one content file into a post
    fn load_file(&self, path: &Path) -> Result<Post> {
        let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let (fm, body) = FrontMatter::parse(&raw);

        let slug = file_stem(path).unwrap_or("untitled").to_string();
        let category = self.category_of(path);

        let date = match fm.parse_date() {
            Some(date) => date,
            None => {
                if let Some(raw_date) = &fm.date {
                    tracing::warn!("Unparseable date {:?} in {}, using now", raw_date, slug);
                }
                Local::now()
            }
        };

        let title = fm
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| slug.clone());

        self.registry.check(&slug, &fm.tags);

        let series = extract_series(&title, fm.series.as_deref());

        let meta = PostMeta {
            description: fm.description.unwrap_or_default(),
            date,
            tags: fm.tags,
            thumbnail: fm.thumbnail,
            reading_time: reading_time(body),
            series_order: series.as_ref().and_then(|s| s.order),
            series: series.map(|s| s.name),
            draft: fm.draft,
            title,
            slug,
            category,
        };

        Ok(Post {
            meta,
            content: body.to_string(),
        })
    }
}

/// Folder a file sits in, relative to the content root
fn category_path(content_dir: &Path, path: &Path) -> String {
    let relative = path
        .parent()
        .and_then(|dir| dir.strip_prefix(content_dir).ok())
        .map(|dir| {
            dir.components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/")
        })
        .unwrap_or_default();

    if relative.is_empty() {
        UNCATEGORIZED.to_string()
    } else {
        relative
    }
}

/// Check if a file is a markdown or MDX file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "mdx")
        .unwrap_or(false)
}

fn file_stem(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Environment, SiteConfig};
    use crate::content::test_support::{blog_with_posts, write_post};

    #[test]
    fn test_load_posts_sorted_by_date_desc() {
        let (_dir, blog) = blog_with_posts(&[
            ("old", "---\ntitle: Old\ndate: 2023-01-01\n---\nold"),
            ("new", "---\ntitle: New\ndate: 2024-06-01\n---\nnew"),
            ("mid", "---\ntitle: Mid\ndate: 2023-07-01\n---\nmid"),
        ]);
        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_equal_dates_keep_file_order() {
        let (_dir, blog) = blog_with_posts(&[
            ("b-post", "---\ndate: 2024-01-01\n---\n"),
            ("a-post", "---\ndate: 2024-01-01\n---\n"),
            ("c-post", "---\ndate: 2024-01-01\n---\n"),
        ]);
        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a-post", "b-post", "c-post"]);
    }

    #[test]
    fn test_load_post_round_trips_frontmatter() {
        let (_dir, blog) = blog_with_posts(&[(
            "hello",
            "---\ntitle: Hello\ndescription: Greeting\ndate: 2024-02-03 04:05:06\ntags: [AI, unknown-tag]\nthumbnail: /img/a.png\n---\n\nBody here.\n",
        )]);
        let post = ContentLoader::new(&blog).load_post("hello").unwrap().unwrap();
        assert_eq!(post.slug, "hello");
        assert_eq!(post.title, "Hello");
        assert_eq!(post.description, "Greeting");
        assert_eq!(
            post.date.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2024-02-03 04:05:06"
        );
        assert_eq!(post.tags, vec!["AI", "unknown-tag"]);
        assert_eq!(post.thumbnail.as_deref(), Some("/img/a.png"));
        assert_eq!(post.reading_time, "1 min read");
        assert_eq!(post.content, "Body here.\n");
        assert!(!post.draft);
    }

    #[test]
    fn test_missing_frontmatter_defaults() {
        let (_dir, blog) = blog_with_posts(&[("bare", "Just text.")]);
        let before = Local::now();
        let post = ContentLoader::new(&blog).load_post("bare").unwrap().unwrap();
        assert_eq!(post.title, "bare");
        assert_eq!(post.description, "");
        assert!(post.tags.is_empty());
        assert!(post.date >= before);
    }

    #[test]
    fn test_unknown_slug_is_none() {
        let (_dir, blog) = blog_with_posts(&[("hello", "---\ntitle: Hello\n---\n")]);
        assert!(ContentLoader::new(&blog).load_post("nope").unwrap().is_none());
    }

    #[test]
    fn test_drafts_hidden_in_production() {
        let (_dir, blog) = blog_with_posts(&[
            ("draft", "---\ntitle: Draft\ndraft: true\n---\n"),
            ("live", "---\ntitle: Live\n---\n"),
        ]);
        let loader = ContentLoader::new(&blog);
        let posts = loader.load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "live");
        assert!(loader.load_post("draft").unwrap().is_none());
    }

    #[test]
    fn test_drafts_visible_in_development() {
        let (dir, _) = blog_with_posts(&[
            ("draft", "---\ntitle: Draft\ndraft: true\n---\n"),
            ("live", "---\ntitle: Live\n---\n"),
        ]);
        let config = SiteConfig {
            environment: Environment::Development,
            ..Default::default()
        };
        let blog = Blog::with_config(dir.path(), config);
        let loader = ContentLoader::new(&blog);
        assert_eq!(loader.load_posts().unwrap().len(), 2);
        let draft = loader.load_post("draft").unwrap().unwrap();
        assert!(draft.draft);
    }

    #[test]
    fn test_nested_and_mdx_files() {
        let (dir, blog) = blog_with_posts(&[("top", "---\ntitle: Top\n---\n")]);
        write_post(dir.path(), "ai/nested.mdx", "---\ntitle: Nested\n---\n<Callout />");
        write_post(dir.path(), "notes.txt", "not a post");
        let loader = ContentLoader::new(&blog);
        assert_eq!(loader.load_posts().unwrap().len(), 2);
        let nested = loader.load_post("nested").unwrap().unwrap();
        assert_eq!(nested.title, "Nested");
        assert_eq!(nested.category, "ai");
        assert_eq!(loader.load_post("top").unwrap().unwrap().category, "uncategorized");
    }

    #[test]
    fn test_category_path() {
        let root = Path::new("/site/content");
        assert_eq!(category_path(root, &root.join("a.md")), "uncategorized");
        assert_eq!(category_path(root, &root.join("dev/a.md")), "dev");
        assert_eq!(category_path(root, &root.join("dev/rust/a.md")), "dev/rust");
    }

    #[test]
    fn test_mistyped_draft_flag_stays_hidden() {
        let (_dir, blog) = blog_with_posts(&[
            (
                "secret",
                "---\ntitle: Secret plan\ndate: 2020-01-01\ndraft: yes\ntags: [AI]\n---\n",
            ),
            ("quoted", "---\ntitle: Quoted\ndraft: \"true\"\n---\n"),
            ("live", "---\ntitle: Live\ndate: 2021-01-01\n---\n"),
        ]);
        let loader = ContentLoader::new(&blog);
        let slugs: Vec<_> = loader
            .load_posts()
            .unwrap()
            .into_iter()
            .map(|p| p.meta.slug)
            .collect();
        assert_eq!(slugs, vec!["live"]);
        assert!(loader.load_post("secret").unwrap().is_none());
    }

    #[test]
    fn test_bad_thumbnail_keeps_other_fields() {
        let (_dir, blog) = blog_with_posts(&[(
            "pic",
            "---\ntitle: Real title\ndate: 2020-01-01\nthumbnail:\n  src: /a.png\ntags: [AI]\n---\nBody\n",
        )]);
        let post = ContentLoader::new(&blog).load_post("pic").unwrap().unwrap();
        assert_eq!(post.title, "Real title");
        assert_eq!(post.date.format("%Y-%m-%d").to_string(), "2020-01-01");
        assert_eq!(post.tags, vec!["AI"]);
        assert_eq!(post.thumbnail, None);
        assert_eq!(post.content, "Body\n");
    }

    #[test]
    fn test_md_preferred_over_mdx() {
        let (dir, blog) = blog_with_posts(&[("same", "---\ntitle: From md\n---\n")]);
        write_post(dir.path(), "same.mdx", "---\ntitle: From mdx\n---\n");
        let post = ContentLoader::new(&blog).load_post("same").unwrap().unwrap();
        assert_eq!(post.title, "From md");
    }

    #[test]
    fn test_series_derived_from_title() {
        let (_dir, blog) = blog_with_posts(&[(
            "rust-2",
            "---\ntitle: Rust 입문 (2편)\n---\n",
        )]);
        let post = ContentLoader::new(&blog).load_post("rust-2").unwrap().unwrap();
        assert_eq!(post.series.as_deref(), Some("Rust 입문"));
        assert_eq!(post.series_order, Some(2));
    }

    #[test]
    fn test_missing_content_dir() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::with_config(dir.path(), SiteConfig::default());
        assert!(ContentLoader::new(&blog).load_posts().unwrap().is_empty());
    }
}
