//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Characters left alone by `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/posts/hello") // -> "https://example.com/posts/hello"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}

/// Permalink of a post
pub fn post_url(config: &SiteConfig, slug: &str) -> String {
    full_url_for(config, &format!("posts/{}", slug))
}

/// Permalink of a tag listing
pub fn tag_url(config: &SiteConfig, tag: &str) -> String {
    full_url_for(config, &format!("tags/{}", encode_component(tag)))
}

/// Percent-encode a single path or query component
pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://blog.example.com/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(full_url_for(&config, ""), "https://blog.example.com");
        assert_eq!(full_url_for(&config, "/tags"), "https://blog.example.com/tags");
    }

    #[test]
    fn test_post_and_tag_urls() {
        let config = test_config();
        assert_eq!(post_url(&config, "hello"), "https://blog.example.com/posts/hello");
        assert_eq!(
            tag_url(&config, "Tech Insight"),
            "https://blog.example.com/tags/Tech%20Insight"
        );
        assert_eq!(
            tag_url(&config, "아키텍트"),
            "https://blog.example.com/tags/%EC%95%84%ED%82%A4%ED%85%8D%ED%8A%B8"
        );
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_component("keep-_.!~*'()"), "keep-_.!~*'()");
    }
}
