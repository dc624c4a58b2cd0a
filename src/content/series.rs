//! Series detection from post titles

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Episode markers looked up when front-matter names the series
    static ref EPISODE_MARKERS: Vec<Regex> = vec![
        Regex::new(r"\((\d+)편\)").unwrap(),
        Regex::new(r"\((\d+)편:").unwrap(),
        Regex::new(r" (\d+)편:").unwrap(),
        Regex::new(r" (\d+)편 ").unwrap(),
        Regex::new(r"(?i)Part (\d+)").unwrap(),
    ];

    /// `<name> (N편...)`, `<name> N편:`, `<name> - Part N`, tried in order
    static ref TITLE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"^(.+?)\s*\((\d+)편").unwrap(),
        Regex::new(r"^(.+?)\s+(\d+)편:").unwrap(),
        Regex::new(r"(?i)^(.+?)\s*-\s*Part\s+(\d+)").unwrap(),
    ];
}

/// Series membership of a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesInfo {
    pub name: String,
    pub order: Option<u32>,
}

/// Work out the series of a post from its title and optional `series` front-matter.
///
/// Heuristic: titles with numerals that are not episode markers can be misread.
pub fn extract_series(title: &str, explicit: Option<&str>) -> Option<SeriesInfo> {
    if let Some(name) = explicit.map(str::trim).filter(|n| !n.is_empty()) {
        let order = EPISODE_MARKERS
            .iter()
            .find_map(|re| re.captures(title))
            .and_then(|caps| caps[1].parse().ok());
        return Some(SeriesInfo {
            name: name.to_string(),
            order,
        });
    }

    let caps = TITLE_PATTERNS.iter().find_map(|re| re.captures(title))?;
    let name = caps[1].trim();
    if name.is_empty() {
        return None;
    }
    Some(SeriesInfo {
        name: name.to_string(),
        order: caps[2].parse().ok(),
    })
}
