//! XML sitemap and robots.txt

use crate::config::SiteConfig;
use crate::content::PostIndex;
use crate::helpers::{date_w3c, escape_xml, full_url_for, post_url, tag_url};

fn push_url(out: &mut String, loc: &str, lastmod: Option<&str>, changefreq: &str, priority: &str) {
    out.push_str("  <url>\n");
    out.push_str(&format!("    <loc>{}</loc>\n", escape_xml(loc)));
    if let Some(lastmod) = lastmod {
        out.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
    }
    out.push_str(&format!("    <changefreq>{}</changefreq>\n", changefreq));
    out.push_str(&format!("    <priority>{}</priority>\n", priority));
    out.push_str("  </url>\n");
}

/// Sitemap listing the home page, the tag pages and every visible post
pub fn render_sitemap(config: &SiteConfig, index: &PostIndex) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');

    push_url(&mut xml, &full_url_for(config, ""), None, "daily", "1.0");
    push_url(&mut xml, &full_url_for(config, "tags"), None, "weekly", "0.7");

    for tag in index.all_tags() {
        push_url(&mut xml, &tag_url(config, &tag.tag), None, "weekly", "0.6");
    }

    for post in index.metas() {
        let lastmod = date_w3c(&post.date);
        push_url(
            &mut xml,
            &post_url(config, &post.slug),
            Some(&lastmod),
            "monthly",
            "0.8",
        );
    }

    xml.push_str("</urlset>\n");
    xml
}

/// robots.txt allowing everything and pointing at the sitemap
pub fn render_robots(config: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}\n",
        full_url_for(config, "sitemap.xml")
    )
}
