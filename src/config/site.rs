//! Site configuration (_config.yml)

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Tags known to the blog. Anything else still indexes, but is reported.
pub const DEFAULT_TAGS: &[&str] = &[
    // Navigation tags
    "AI",
    "Develop",
    "Thoughts",
    "Blockchain",
    "Daily",
    // Content tags
    "Tech",
    "claude-code",
    "nextjs",
    "blog",
    "seo",
    "theming",
    "persona",
    "writing",
    "search",
    "rss",
    "og-image",
    "giscus",
    "ux",
    "prisma",
    "neon",
    "analytics",
    "future",
    "singapore",
    "framer-motion",
    "animation",
    "아키텍트",
    "1인개발",
    "시스템설계",
    "semiconductor",
    "llm",
    "engineering",
    "automation",
    "ai-agent",
    "governance",
    "Structure",
    "Cognition",
    "BufferLine",
    "OpenClaw",
    "WebMCP",
    "Matrix",
    "Tech Insight",
];

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    /// IANA timezone used for the "daily" ranking window. Empty means system local.
    pub timezone: String,

    // URL
    pub url: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,
    pub guide_dir: String,

    // Writing
    pub environment: Environment,
    pub tags: Vec<String>,

    // Feeds
    pub feed_limit: usize,
    /// Related posts considered before tag priority is applied
    pub related_count: usize,
    /// Related posts returned after tag priority
    pub related_display: usize,

    pub views: ViewsConfig,

    /// Allow-list of guide documents
    pub guides: Vec<GuideDoc>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "뇌 용량 확보용".to_string(),
            description: "머릿속 비우고 RAM 확보하기 위해 만든 블로그".to_string(),
            author: "John Doe".to_string(),
            language: "ko".to_string(),
            timezone: String::new(),

            url: "http://example.com".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),
            guide_dir: "public/ai".to_string(),

            environment: Environment::Production,
            tags: DEFAULT_TAGS.iter().map(|t| t.to_string()).collect(),

            feed_limit: 20,
            related_count: 6,
            related_display: 3,

            views: ViewsConfig::default(),
            guides: default_guides(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply `BLOG_ENV` and `BLOG_VIEW_SECRET` from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(env) = std::env::var("BLOG_ENV") {
            self.environment = env.parse()?;
            tracing::debug!("Environment overridden to {}", self.environment);
        }
        if let Ok(secret) = std::env::var("BLOG_VIEW_SECRET") {
            self.views.secret = secret;
        }
        Ok(())
    }

    /// Whether draft posts should be listed and served
    pub fn show_drafts(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Parsed `timezone`, `None` for system local time
    pub fn tz(&self) -> Result<Option<chrono_tz::Tz>> {
        if self.timezone.trim().is_empty() {
            return Ok(None);
        }
        self.timezone
            .parse::<chrono_tz::Tz>()
            .map(Some)
            .map_err(|e| anyhow!("Invalid timezone {:?}: {}", self.timezone, e))
    }
}

/// Deployment environment; drafts are only visible in development
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(anyhow!("Unknown environment: {}", other)),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => f.write_str("development"),
            Environment::Production => f.write_str("production"),
        }
    }
}

/// Where view records are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewBackend {
    /// Append-only JSONL file
    File,
    /// Process memory, lost on restart
    Memory,
}

/// View counting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewsConfig {
    pub backend: ViewBackend,
    pub data_file: String,
    /// Salt mixed into client IP hashes
    pub secret: String,
    pub throttle_minutes: i64,
    /// `s-maxage` for ranking responses, in seconds
    pub rankings_max_age: u64,
    pub rankings_stale: u64,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            backend: ViewBackend::File,
            data_file: "data/views.jsonl".to_string(),
            secret: String::new(),
            throttle_minutes: 10,
            rankings_max_age: 3600,
            rankings_stale: 7200,
        }
    }
}

fn default_guides() -> Vec<GuideDoc> {
    [
        ("blog-guide", "블로그 글 작성 가이드"),
        ("persona_base", "기본 페르소나 (구조 디버거)"),
        ("persona_blogger", "블로거 페르소나 (사고 기록자)"),
        ("persona_commenter", "댓글 페르소나 (논점 교정자)"),
        ("template", "템플릿"),
    ]
    .into_iter()
    .map(|(slug, title)| GuideDoc {
        slug: slug.to_string(),
        title: title.to_string(),
    })
    .collect()
}

/// A plain-text writing guide served under /api/guide
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideDoc {
    pub slug: String,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "content");
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.feed_limit, 20);
        assert_eq!(config.related_display, 3);
        assert_eq!(config.views.throttle_minutes, 10);
        assert!(config.tags.iter().any(|t| t == "AI"));
        assert!(!config.show_drafts());
        assert_eq!(config.guides.len(), 5);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
url: https://blog.example.com
environment: development
timezone: Asia/Seoul
tags:
  - rust
views:
  backend: memory
  throttle_minutes: 5
guides:
  - slug: blog-guide
    title: Writing guide
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.tags, vec!["rust"]);
        assert_eq!(config.views.backend, ViewBackend::Memory);
        assert_eq!(config.views.throttle_minutes, 5);
        assert_eq!(config.views.rankings_max_age, 3600);
        assert_eq!(config.guides[0].slug, "blog-guide");
        assert_eq!(config.tz().unwrap(), Some(chrono_tz::Asia::Seoul));
        assert!(config.show_drafts());
    }

    #[test]
    fn test_environment_from_str() {
        assert_eq!(
            "Development".parse::<Environment>().unwrap(),
            Environment::Development
        );
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_invalid_timezone() {
        let config = SiteConfig {
            timezone: "Mars/Olympus".to_string(),
            ..Default::default()
        };
        assert!(config.tz().is_err());
    }
}
