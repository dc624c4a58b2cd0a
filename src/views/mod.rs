//! Page views and popularity rankings
//!
//! Views are append-only records keyed by slug and a salted hash of the client
//! address. Repeat views from one client inside the throttle window are
//! dropped on write; reads count every stored record.

mod service;
mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use service::{Clock, RecordOutcome, ViewService, MAX_RANKING_LIMIT};
pub use store::{JsonlViewStore, MemoryViewStore, ViewStore};

/// A single recorded page view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageView {
    pub slug: String,
    pub ip_hash: String,
    pub viewed_at: DateTime<Utc>,
}

/// Views per slug inside a ranking window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ranking {
    pub slug: String,
    pub views: u64,
}

/// Ranking window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Since midnight today
    Daily,
    /// Last 7 days
    Weekly,
    /// Last 30 days
    Monthly,
    #[default]
    Total,
}

impl FromStr for Period {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, ViewError> {
        match s {
            "daily" => Ok(Period::Daily),
            "weekly" => Ok(Period::Weekly),
            "monthly" => Ok(Period::Monthly),
            "total" => Ok(Period::Total),
            other => Err(ViewError::UnknownPeriod(other.to_string())),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::Total => "total",
        };
        f.write_str(name)
    }
}

/// Errors of the view service
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("slug required")]
    MissingSlug,

    #[error("unknown period: {0}")]
    UnknownPeriod(String),

    #[error("view store failure: {0:#}")]
    Store(#[from] anyhow::Error),
}
