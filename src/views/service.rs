//! View recording, counting and ranking windows

use chrono::{DateTime, Duration, TimeZone, Utc};
use sha2::{Digest, Sha256};
use std::sync::Arc;

use super::{PageView, Period, Ranking, ViewError, ViewStore};
use crate::config::SiteConfig;

/// Source of the current time
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Upper bound for a rankings `limit`
pub const MAX_RANKING_LIMIT: usize = 50;

const CLIENT_HASH_LEN: usize = 16;

/// Result of [`ViewService::record_view`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Recorded,
    /// The same client viewed the post inside the throttle window
    Throttled,
}

/// Records views and answers count and ranking queries
#[derive(Clone)]
pub struct ViewService {
    store: Arc<dyn ViewStore>,
    secret: String,
    throttle: Duration,
    timezone: Option<chrono_tz::Tz>,
    clock: Clock,
}

impl ViewService {
    pub fn new(store: Arc<dyn ViewStore>, config: &SiteConfig) -> anyhow::Result<Self> {
        if config.views.secret.is_empty() {
            tracing::warn!("views.secret is empty; client hashes are unsalted");
        }
        Ok(Self {
            store,
            secret: config.views.secret.clone(),
            throttle: Duration::minutes(config.views.throttle_minutes.max(0)),
            timezone: config.tz()?,
            clock: Arc::new(Utc::now),
        })
    }

    /// Replace the wall clock
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Salted, truncated SHA-256 of a client address
    pub fn hash_client(&self, ip: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(ip.as_bytes());
        hasher.update(self.secret.as_bytes());
        let mut digest = hex::encode(hasher.finalize());
        digest.truncate(CLIENT_HASH_LEN);
        digest
    }

    /// Store a view of `slug` unless this client already viewed it within the throttle window
    pub async fn record_view(&self, slug: &str, client_ip: &str) -> Result<RecordOutcome, ViewError> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(ViewError::MissingSlug);
        }

        let now = self.now();
        let ip_hash = self.hash_client(client_ip);

        if self
            .store
            .has_view_since(slug, &ip_hash, now - self.throttle)
            .await?
        {
            tracing::debug!("Throttled view of {} from {}", slug, ip_hash);
            return Ok(RecordOutcome::Throttled);
        }

        self.store
            .append(PageView {
                slug: slug.to_string(),
                ip_hash,
                viewed_at: now,
            })
            .await?;

        Ok(RecordOutcome::Recorded)
    }

    /// All-time view count of `slug`
    pub async fn view_count(&self, slug: &str) -> Result<u64, ViewError> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(ViewError::MissingSlug);
        }
        Ok(self.store.count(slug).await?)
    }

    /// Most viewed slugs in `period`, highest first, ties by slug
    pub async fn rankings(&self, period: Period, limit: usize) -> Result<Vec<Ranking>, ViewError> {
        let since = self.window_start(period);
        let mut rankings: Vec<Ranking> = self
            .store
            .count_by_slug(since)
            .await?
            .into_iter()
            .map(|(slug, views)| Ranking { slug, views })
            .collect();

        rankings.sort_by(|a, b| b.views.cmp(&a.views).then_with(|| a.slug.cmp(&b.slug)));
        rankings.truncate(limit.min(MAX_RANKING_LIMIT));
        Ok(rankings)
    }

    /// Lower bound of a ranking window, `None` for all time
    pub fn window_start(&self, period: Period) -> Option<DateTime<Utc>> {
        let now = self.now();
        match period {
            Period::Daily => Some(match &self.timezone {
                Some(tz) => start_of_day(now, tz),
                None => start_of_day(now, &chrono::Local),
            }),
            Period::Weekly => Some(now - Duration::days(7)),
            Period::Monthly => Some(now - Duration::days(30)),
            Period::Total => None,
        }
    }
}

/// First existing local instant of today. Midnight can fall in a DST gap, so
/// later quarter hours are tried until one exists.
fn start_of_day<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    let today = now.with_timezone(tz).date_naive();
    (0..24 * 4)
        .filter_map(|quarter| today.and_hms_opt(quarter / 4, (quarter % 4) * 15, 0))
        .find_map(|local| tz.from_local_datetime(&local).earliest())
        .map(|start| start.with_timezone(&Utc))
        .unwrap_or(now - Duration::days(1))
}
