//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Blog;

/// Remove generated files. View data is left alone.
pub fn run(blog: &Blog) -> Result<()> {
    if blog.public_dir.exists() {
        for name in ["feed.xml", "sitemap.xml", "robots.txt", "search.json"] {
            let path = blog.public_dir.join(name);
            if path.exists() {
                fs::remove_file(&path)?;
                tracing::info!("Deleted: {:?}", path);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::test_support::blog_with_posts;

    #[test]
    fn test_clean_keeps_guides() {
        let (_dir, blog) = blog_with_posts(&[("hello", "---\ntitle: Hello\n---\n")]);
        blog.generate().unwrap();
        fs::create_dir_all(&blog.guide_dir).unwrap();
        fs::write(blog.guide_dir.join("blog-guide.md"), "guide").unwrap();

        run(&blog).unwrap();

        assert!(!blog.public_dir.join("feed.xml").exists());
        assert!(!blog.public_dir.join("search.json").exists());
        assert!(blog.guide_dir.join("blog-guide.md").exists());

        // Nothing to clean is fine
        run(&blog).unwrap();
    }
}
