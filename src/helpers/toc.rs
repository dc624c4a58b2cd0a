//! Table of contents extraction from raw markdown

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref HEADING: Regex = Regex::new(r"(?m)^(#{2,4})[ \t]+(.+?)[ \t\r]*$").unwrap();
    static ref NOT_SLUG_CHAR: Regex = Regex::new(r"[^a-z0-9가-힣\s-]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref HYPHENS: Regex = Regex::new(r"-+").unwrap();
}

/// One heading of a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocItem {
    /// 2 to 4
    pub level: u8,
    pub text: String,
    /// Anchor id, not deduplicated
    pub slug: String,
}

/// Collect `##` to `####` headings in document order
pub fn extract_toc(content: &str) -> Vec<TocItem> {
    HEADING
        .captures_iter(content)
        .map(|caps| {
            let text = caps[2].to_string();
            TocItem {
                level: caps[1].len() as u8,
                slug: heading_slug(&text),
                text,
            }
        })
        .collect()
}

/// Anchor slug for a heading: Hangul survives, punctuation does not
pub fn heading_slug(text: &str) -> String {
    let lower = text.to_lowercase();
    let stripped = NOT_SLUG_CHAR.replace_all(&lower, "");
    let hyphenated = WHITESPACE.replace_all(&stripped, "-");
    let collapsed = HYPHENS.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_slug() {
        assert_eq!(heading_slug("Hello, World! 테스트"), "hello-world-테스트");
        assert_eq!(heading_slug("  --Leading and trailing--  "), "leading-and-trailing");
        assert_eq!(heading_slug("a - b"), "a-b");
        assert_eq!(heading_slug("Rust 2024: What's new?"), "rust-2024-whats-new");
        assert_eq!(heading_slug("!!!"), "");
    }

    #[test]
    fn test_extract_toc_levels() {
        let content = "# Title\n\n## Intro\ntext\n### Details here\n#### Deep\n##### Too deep\n## Outro";
        let toc = extract_toc(content);
        let summary: Vec<_> = toc.iter().map(|t| (t.level, t.text.as_str())).collect();
        assert_eq!(
            summary,
            vec![(2, "Intro"), (3, "Details here"), (4, "Deep"), (2, "Outro")]
        );
        assert_eq!(toc[1].slug, "details-here");
    }

    #[test]
    fn test_level_four_without_three() {
        let toc = extract_toc("## A\n#### B\n");
        assert_eq!(toc[1].level, 4);
    }

    #[test]
    fn test_duplicate_headings_share_slug() {
        let toc = extract_toc("## Setup\n\n## Setup\n");
        assert_eq!(toc.len(), 2);
        assert_eq!(toc[0].slug, toc[1].slug);
    }

    #[test]
    fn test_not_a_heading() {
        assert!(extract_toc("##NoSpace\n text ## inline\n  ## indented").is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let toc = extract_toc("## Windows\r\n## Lines\r\n");
        assert_eq!(toc[0].text, "Windows");
        assert_eq!(toc[1].slug, "lines");
    }
}
