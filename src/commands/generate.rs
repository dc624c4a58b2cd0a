//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Blog;

/// Write feed, sitemap, robots.txt and search index
pub fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let index = blog.index()?;
    tracing::info!("Loaded {} posts", index.len());

    Generator::new(blog).generate(&index)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}
