//! Known-tag registry

use std::collections::HashSet;

/// Set of tags the blog expects. Unknown tags are reported, never rejected.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    known: HashSet<String>,
}

impl TagRegistry {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.known.contains(tag)
    }

    /// Tags of `slug` that are not registered, logging a warning for each
    pub fn check<'a>(&self, slug: &str, tags: &'a [String]) -> Vec<&'a str> {
        let unknown: Vec<&str> = tags
            .iter()
            .map(String::as_str)
            .filter(|t| !self.contains(t))
            .collect();
        for tag in &unknown {
            tracing::warn!("Unknown tag {:?} in post {}", tag, slug);
        }
        unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_reports_unknown_tags() {
        let registry = TagRegistry::new(["AI", "Daily"]);
        let tags = vec!["AI".to_string(), "rust".to_string(), "Daily".to_string()];
        assert_eq!(registry.check("post", &tags), vec!["rust"]);
    }

    #[test]
    fn test_check_is_case_sensitive() {
        let registry = TagRegistry::new(["AI"]);
        assert_eq!(registry.check("post", &["ai".to_string()]), vec!["ai"]);
    }
}
