//! Initialize a new blog site

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG_TEMPLATE: &str = r#"# Site
title: 뇌 용량 확보용
description: 머릿속 비우고 RAM 확보하기 위해 만든 블로그
author: John Doe
language: ko
# IANA name used for the daily ranking window; empty for system local time
timezone: ''

# URL
url: http://example.com

# Directory
content_dir: content
public_dir: public
guide_dir: public/ai

# Writing
environment: production

# Feeds
feed_limit: 20
related_count: 6
related_display: 3

# Views
views:
  backend: file
  data_file: data/views.jsonl
  # Salt for client hashes, overridden by BLOG_VIEW_SECRET
  secret: ''
  throttle_minutes: 10
  rankings_max_age: 3600
  rankings_stale: 7200
"#;

const GUIDE_TEMPLATE: &str = r#"# 블로그 글 작성 가이드

- 파일 이름이 곧 slug 입니다.
- front-matter: title, description, date, tags, thumbnail, series, draft
- 시리즈 글은 제목에 "(N편)" 또는 "Part N" 을 붙입니다.
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("Site already initialized: {:?}", config_path);
    }

    fs::create_dir_all(target_dir.join("content"))?;
    fs::create_dir_all(target_dir.join("public/ai"))?;
    fs::create_dir_all(target_dir.join("data"))?;

    fs::write(&config_path, CONFIG_TEMPLATE)?;
    fs::write(target_dir.join("public/ai/blog-guide.md"), GUIDE_TEMPLATE)?;

    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
description: 첫 번째 글
date: {}
tags:
  - Daily
---

Welcome! This is your very first post.

## Quick Start

### Create a new post

```bash
$ blog-rs new "My New Post" --tags Tech
```

### Run server

```bash
$ blog-rs server
```
"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    fs::write(target_dir.join("content/hello-world.md"), sample_post)?;

    Ok(())
}
