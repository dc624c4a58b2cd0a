//! List site content

use anyhow::Result;
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::config::Environment;
use crate::content::PostIndex;
use crate::Blog;

/// Render a listing of posts, tags, series or drafts
pub fn render(blog: &Blog, content_type: &str) -> Result<String> {
    let mut out = String::new();

    match content_type {
        "post" | "posts" => {
            let index = blog.index()?;
            writeln!(out, "Posts ({}):", index.len())?;
            for post in index.metas() {
                writeln!(
                    out,
                    "  {} - {} [{}]",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.slug
                )?;
            }
        }
        "tag" | "tags" => {
            let tags = blog.index()?.all_tags();
            writeln!(out, "Tags ({}):", tags.len())?;
            for tag in tags {
                writeln!(out, "  {} ({})", tag.tag, tag.count)?;
            }
        }
        "category" | "categories" => {
            let index = blog.index()?;
            let categories = index.categories();
            writeln!(out, "Categories ({}):", categories.len())?;
            for category in categories {
                writeln!(
                    out,
                    "  {} ({})",
                    category,
                    index.posts_by_category(category).len()
                )?;
            }
        }
        "series" => {
            let index = blog.index()?;
            let mut series: BTreeMap<&str, Vec<(u32, &str)>> = BTreeMap::new();
            for post in index.metas() {
                if let Some(name) = post.series.as_deref() {
                    series
                        .entry(name)
                        .or_default()
                        .push((post.series_order.unwrap_or(0), post.slug.as_str()));
                }
            }
            writeln!(out, "Series ({}):", series.len())?;
            for (name, mut posts) in series {
                posts.sort_by_key(|(order, _)| *order);
                writeln!(out, "  {} ({})", name, posts.len())?;
                for (order, slug) in posts {
                    writeln!(out, "    {}. {}", order, slug)?;
                }
            }
        }
        "draft" | "drafts" => {
            let mut preview = blog.clone();
            preview.config.environment = Environment::Development;
            let index = PostIndex::load(&preview)?;
            let drafts: Vec<_> = index.metas().filter(|p| p.draft).collect();
            writeln!(out, "Drafts ({}):", drafts.len())?;
            for post in drafts {
                writeln!(out, "  {} [{}]", post.title, post.slug)?;
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, category, series, draft",
                content_type
            );
        }
    }

    Ok(out)
}

/// List site content by type
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    print!("{}", render(blog, content_type)?);
    Ok(())
}
