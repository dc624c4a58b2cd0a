//! Open Graph and structured-data metadata for posts

use serde_json::{json, Value};

use super::url::{encode_component, full_url_for, post_url};
use crate::config::SiteConfig;
use crate::content::PostMeta;

/// URL of the generated social card for a post
pub fn og_image_url(config: &SiteConfig, post: &PostMeta) -> String {
    let category = post.tags.first().map(String::as_str).unwrap_or("");
    format!(
        "{}?title={}&category={}",
        full_url_for(config, "api/og"),
        encode_component(&post.title),
        encode_component(category)
    )
}

/// schema.org `BlogPosting` for a post
pub fn article_json_ld(config: &SiteConfig, post: &PostMeta) -> Value {
    let url = post_url(config, &post.slug);
    let published = post.date.to_rfc3339();

    let mut ld = json!({
        "@context": "https://schema.org",
        "@type": "BlogPosting",
        "headline": post.title,
        "description": post.description,
        "datePublished": published,
        "dateModified": published,
        "url": url,
        "author": { "@type": "Person", "name": config.author },
        "publisher": { "@type": "Person", "name": config.author },
        "mainEntityOfPage": { "@type": "WebPage", "@id": url },
        "keywords": post.tags.join(", "),
        "inLanguage": config.language,
    });

    if let Some(thumbnail) = &post.thumbnail {
        ld["image"] = Value::String(full_url_for(config, thumbnail));
    }
    if let Some(tag) = post.tags.first() {
        ld["articleSection"] = Value::String(tag.clone());
    }

    ld
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::test_support::post;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://blog.example.com".to_string(),
            author: "Writer".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_og_image_url() {
        let p = post("hello", "Hello & bye", &["AI", "Daily"]);
        assert_eq!(
            og_image_url(&test_config(), &p),
            "https://blog.example.com/api/og?title=Hello%20%26%20bye&category=AI"
        );

        let untagged = post("plain", "Plain", &[]);
        assert!(og_image_url(&test_config(), &untagged).ends_with("&category="));
    }

    #[test]
    fn test_article_json_ld() {
        let mut p = post("hello", "Hello", &["AI", "Daily"]);
        p.meta.thumbnail = Some("/img/hello.png".to_string());
        let ld = article_json_ld(&test_config(), &p);
        assert_eq!(ld["@type"], "BlogPosting");
        assert_eq!(ld["url"], "https://blog.example.com/posts/hello");
        assert_eq!(ld["keywords"], "AI, Daily");
        assert_eq!(ld["author"]["name"], "Writer");
        assert_eq!(ld["articleSection"], "AI");
        assert_eq!(ld["image"], "https://blog.example.com/img/hello.png");
    }
}
