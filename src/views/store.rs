//! Storage backends for page views

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::{Mutex, RwLock};

use super::PageView;

/// Persistent, append-only view log.
///
/// The throttle check and the append are separate calls; implementations are
/// not required to make the pair atomic.
#[async_trait]
pub trait ViewStore: Send + Sync {
    /// Store a new view
    async fn append(&self, view: PageView) -> Result<()>;

    /// Whether `ip_hash` viewed `slug` at or after `since`
    async fn has_view_since(&self, slug: &str, ip_hash: &str, since: DateTime<Utc>) -> Result<bool>;

    /// All-time number of views of `slug`
    async fn count(&self, slug: &str) -> Result<u64>;

    /// Views per slug at or after `since` (everything when `None`), in no particular order
    async fn count_by_slug(&self, since: Option<DateTime<Utc>>) -> Result<Vec<(String, u64)>>;
}

fn tally<'a>(
    views: impl Iterator<Item = &'a PageView>,
    since: Option<DateTime<Utc>>,
) -> Vec<(String, u64)> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for view in views.filter(|v| since.map_or(true, |s| v.viewed_at >= s)) {
        *counts.entry(view.slug.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(slug, n)| (slug.to_string(), n))
        .collect()
}

fn seen_since(views: &[PageView], slug: &str, ip_hash: &str, since: DateTime<Utc>) -> bool {
    views
        .iter()
        .any(|v| v.slug == slug && v.ip_hash == ip_hash && v.viewed_at >= since)
}

/// Views kept in process memory
#[derive(Debug, Default)]
pub struct MemoryViewStore {
    views: RwLock<Vec<PageView>>,
}

impl MemoryViewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored view
    pub async fn views(&self) -> Vec<PageView> {
        self.views.read().await.clone()
    }
}

#[async_trait]
impl ViewStore for MemoryViewStore {
    async fn append(&self, view: PageView) -> Result<()> {
        self.views.write().await.push(view);
        Ok(())
    }

    async fn has_view_since(&self, slug: &str, ip_hash: &str, since: DateTime<Utc>) -> Result<bool> {
        Ok(seen_since(&self.views.read().await, slug, ip_hash, since))
    }

    async fn count(&self, slug: &str) -> Result<u64> {
        let views = self.views.read().await;
        Ok(views.iter().filter(|v| v.slug == slug).count() as u64)
    }

    async fn count_by_slug(&self, since: Option<DateTime<Utc>>) -> Result<Vec<(String, u64)>> {
        Ok(tally(self.views.read().await.iter(), since))
    }
}

/// Views stored as newline-delimited JSON, one record per line
pub struct JsonlViewStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlViewStore {
    /// Open a log at `path`, creating its directory
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create view directory: {}", parent.display()))?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record. Unparseable lines are logged and skipped.
    pub async fn replay(&self) -> Result<Vec<PageView>> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .await
            .with_context(|| format!("Failed to open view log: {}", self.path.display()))?;

        let mut lines = BufReader::new(file).lines();
        let mut views = Vec::new();
        let mut line_no = 0usize;

        while let Some(line) = lines.next_line().await? {
            line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<PageView>(&line) {
                Ok(view) => views.push(view),
                Err(e) => tracing::warn!(
                    "Skipping bad view record at {}:{}: {}",
                    self.path.display(),
                    line_no,
                    e
                ),
            }
        }

        Ok(views)
    }
}

#[async_trait]
impl ViewStore for JsonlViewStore {
    async fn append(&self, view: PageView) -> Result<()> {
        let json = serde_json::to_string(&view).context("Failed to serialize view")?;

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("Failed to open view log: {}", self.path.display()))?;

        file.write_all(format!("{}\n", json).as_bytes())
            .await
            .context("Failed to write view")?;
        file.flush().await.context("Failed to flush view")?;

        Ok(())
    }

    async fn has_view_since(&self, slug: &str, ip_hash: &str, since: DateTime<Utc>) -> Result<bool> {
        Ok(seen_since(&self.replay().await?, slug, ip_hash, since))
    }

    async fn count(&self, slug: &str) -> Result<u64> {
        let views = self.replay().await?;
        Ok(views.iter().filter(|v| v.slug == slug).count() as u64)
    }

    async fn count_by_slug(&self, since: Option<DateTime<Utc>>) -> Result<Vec<(String, u64)>> {
        Ok(tally(self.replay().await?.iter(), since))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn view(slug: &str, ip_hash: &str, at: DateTime<Utc>) -> PageView {
        PageView {
            slug: slug.to_string(),
            ip_hash: ip_hash.to_string(),
            viewed_at: at,
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    async fn exercise(store: &dyn ViewStore) {
        store.append(view("a", "h1", t0())).await.unwrap();
        store.append(view("a", "h2", t0() + Duration::hours(1))).await.unwrap();
        store.append(view("b", "h1", t0() + Duration::hours(2))).await.unwrap();

        assert_eq!(store.count("a").await.unwrap(), 2);
        assert_eq!(store.count("missing").await.unwrap(), 0);

        assert!(store.has_view_since("a", "h1", t0()).await.unwrap());
        assert!(!store
            .has_view_since("a", "h1", t0() + Duration::minutes(1))
            .await
            .unwrap());
        assert!(!store.has_view_since("b", "h2", t0()).await.unwrap());

        let mut all = store.count_by_slug(None).await.unwrap();
        all.sort();
        assert_eq!(all, vec![("a".to_string(), 2), ("b".to_string(), 1)]);

        let mut recent = store
            .count_by_slug(Some(t0() + Duration::minutes(30)))
            .await
            .unwrap();
        recent.sort();
        assert_eq!(recent, vec![("a".to_string(), 1), ("b".to_string(), 1)]);
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryViewStore::new();
        exercise(&store).await;
        assert_eq!(store.views().await.len(), 3);
    }

    #[tokio::test]
    async fn test_jsonl_store() {
        let temp = TempDir::new().unwrap();
        let store = JsonlViewStore::open(temp.path().join("data/views.jsonl"))
            .await
            .unwrap();
        exercise(&store).await;

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_jsonl_store_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = JsonlViewStore::open(temp.path().join("views.jsonl")).await.unwrap();
        assert_eq!(store.count("a").await.unwrap(), 0);
        assert!(store.count_by_slug(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_jsonl_store_skips_bad_lines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("views.jsonl");
        std::fs::write(
            &path,
            "{\"slug\":\"a\",\"ip_hash\":\"h\",\"viewed_at\":\"2024-06-01T12:00:00Z\"}\nnot json\n\n",
        )
        .unwrap();
        let store = JsonlViewStore::open(&path).await.unwrap();
        assert_eq!(store.count("a").await.unwrap(), 1);
    }
}
