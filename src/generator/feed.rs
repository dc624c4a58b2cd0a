//! RSS 2.0 feed

use chrono::{DateTime, Utc};

use crate::config::SiteConfig;
use crate::content::PostMeta;
use crate::helpers::{date_rfc822, escape_xml, full_url_for, post_url};

/// Render the feed for `posts` (newest first); at most `feed_limit` items are included
pub fn render_rss<'a>(
    config: &SiteConfig,
    posts: impl IntoIterator<Item = &'a PostMeta>,
    built_at: DateTime<Utc>,
) -> String {
    let site_url = full_url_for(config, "");

    let mut feed = String::new();
    feed.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    feed.push('\n');
    feed.push_str(r#"<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">"#);
    feed.push('\n');
    feed.push_str("  <channel>\n");
    feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&config.title)));
    feed.push_str(&format!("    <link>{}</link>\n", escape_xml(&site_url)));
    feed.push_str(&format!(
        "    <description>{}</description>\n",
        escape_xml(&config.description)
    ));
    feed.push_str(&format!(
        "    <language>{}</language>\n",
        escape_xml(&config.language)
    ));
    feed.push_str(&format!(
        "    <lastBuildDate>{}</lastBuildDate>\n",
        date_rfc822(&built_at)
    ));
    feed.push_str(&format!(
        "    <atom:link href=\"{}\" rel=\"self\" type=\"application/rss+xml\"/>\n",
        escape_xml(&full_url_for(config, "feed.xml"))
    ));

    for post in posts.into_iter().take(config.feed_limit) {
        let link = escape_xml(&post_url(config, &post.slug));
        feed.push_str("    <item>\n");
        feed.push_str(&format!("      <title>{}</title>\n", escape_xml(&post.title)));
        feed.push_str(&format!("      <link>{}</link>\n", link));
        feed.push_str(&format!("      <guid isPermaLink=\"true\">{}</guid>\n", link));
        feed.push_str(&format!(
            "      <description>{}</description>\n",
            escape_xml(&post.description)
        ));
        feed.push_str(&format!("      <pubDate>{}</pubDate>\n", date_rfc822(&post.date)));
        for tag in &post.tags {
            feed.push_str(&format!("      <category>{}</category>\n", escape_xml(tag)));
        }
        feed.push_str("    </item>\n");
    }

    feed.push_str("  </channel>\n");
    feed.push_str("</rss>\n");
    feed
}
