//! Series navigation and related posts

use serde::Serialize;

use super::{PostIndex, PostMeta};

/// Position of a post within its series
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesNavigation<'a> {
    pub series: &'a str,
    /// Series members by ascending order
    pub posts: Vec<&'a PostMeta>,
    pub current_index: usize,
    pub prev: Option<&'a PostMeta>,
    pub next: Option<&'a PostMeta>,
}

/// Navigation for the series `post` belongs to.
///
/// `None` when the post has no series or is not part of the index.
pub fn series_navigation<'a>(index: &'a PostIndex, post: &'a PostMeta) -> Option<SeriesNavigation<'a>> {
    let series = post.series.as_deref()?;

    let mut posts: Vec<&PostMeta> = index
        .metas()
        .filter(|p| p.series.as_deref() == Some(series))
        .collect();
    // Stable: equal orders keep index order
    posts.sort_by_key(|p| p.series_order.unwrap_or(0));

    let current_index = posts.iter().position(|p| p.slug == post.slug)?;
    let prev = current_index.checked_sub(1).map(|i| posts[i]);
    let next = posts.get(current_index + 1).copied();

    Some(SeriesNavigation {
        series,
        posts,
        current_index,
        prev,
        next,
    })
}

/// Up to `count` posts sharing tags with `post`, most shared tags first.
///
/// Posts from the same named series are left out, and so is anything with no
/// tag in common.
pub fn related_posts<'a>(index: &'a PostIndex, post: &PostMeta, count: usize) -> Vec<&'a PostMeta> {
    if post.tags.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, &PostMeta)> = index
        .metas()
        .filter(|p| p.slug != post.slug && !p.same_series(post))
        .map(|p| {
            let score = p.tags.iter().filter(|t| post.has_tag(t)).count();
            (score, p)
        })
        .filter(|(score, _)| *score > 0)
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().take(count).map(|(_, p)| p).collect()
}

/// Move posts tagged `tag` to the front, keeping relative order otherwise
pub fn prioritize_tag<'a>(mut posts: Vec<&'a PostMeta>, tag: &str) -> Vec<&'a PostMeta> {
    posts.sort_by_key(|p| !p.has_tag(tag));
    posts
}
