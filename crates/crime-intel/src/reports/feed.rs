use super::domain::{iso_timestamp, Report};
use super::import::{ImportError, ReportImporter};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

/// Upstream that yields a finished report batch on demand.
pub trait ReportSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<Report>, SourceError>;

    fn describe(&self) -> String;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error("report source unavailable: {0}")]
    Unavailable(String),
}

/// Reads the batch from a JSON or CSV file on every fetch.
#[derive(Debug, Clone)]
pub struct FileReportSource {
    path: PathBuf,
}

impl FileReportSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSource for FileReportSource {
    fn fetch(&self) -> Result<Vec<Report>, SourceError> {
        Ok(ReportImporter::from_path(&self.path)?)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticReportSource {
    reports: Vec<Report>,
}

impl StaticReportSource {
    pub fn new(reports: Vec<Report>) -> Self {
        Self { reports }
    }
}

impl ReportSource for StaticReportSource {
    fn fetch(&self) -> Result<Vec<Report>, SourceError> {
        Ok(self.reports.clone())
    }

    fn describe(&self) -> String {
        format!("static:{} reports", self.reports.len())
    }
}

/// Most recent batch together with when it was taken.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSnapshot {
    pub reports: Vec<Report>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "optional_timestamp")]
    pub refreshed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedStatus {
    pub source: String,
    pub refreshing: bool,
    #[serde(serialize_with = "optional_timestamp")]
    pub last_refreshed_at: Option<DateTime<Utc>>,
    pub cached_reports: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_interval_minutes: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("refresh already in progress")]
    RefreshInProgress,
    #[error("refresh failed: {0}")]
    Source(#[from] SourceError),
}

/// Owns the "last result" for callers that need a shared, replace-wholesale batch.
pub struct ReportFeed {
    source: Arc<dyn ReportSource>,
    snapshot: RwLock<Arc<FeedSnapshot>>,
    refreshing: AtomicBool,
    scheduled_interval_minutes: Option<u64>,
}

impl ReportFeed {
    pub fn new(source: Arc<dyn ReportSource>) -> Self {
        Self {
            source,
            snapshot: RwLock::new(Arc::new(FeedSnapshot::default())),
            refreshing: AtomicBool::new(false),
            scheduled_interval_minutes: None,
        }
    }

    /// Records the periodic refresh cadence reported by `status`; `0` disables it.
    pub fn with_schedule(mut self, minutes: Option<u64>) -> Self {
        self.scheduled_interval_minutes = minutes.filter(|minutes| *minutes > 0);
        self
    }

    pub fn scheduled_interval_minutes(&self) -> Option<u64> {
        self.scheduled_interval_minutes
    }

    pub fn snapshot(&self) -> Arc<FeedSnapshot> {
        match self.snapshot.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    pub fn refresh(&self) -> Result<Arc<FeedSnapshot>, FeedError> {
        self.refresh_at(Utc::now())
    }

    pub fn refresh_at(&self, now: DateTime<Utc>) -> Result<Arc<FeedSnapshot>, FeedError> {
        if self
            .refreshing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(FeedError::RefreshInProgress);
        }
        let _reset = RefreshGuard(&self.refreshing);

        let reports = match self.source.fetch() {
            Ok(reports) => reports,
            Err(err) => {
                warn!(source = %self.source.describe(), error = %err, "report refresh failed");
                return Err(err.into());
            }
        };

        let snapshot = Arc::new(FeedSnapshot {
            reports,
            refreshed_at: Some(now),
        });
        match self.snapshot.write() {
            Ok(mut guard) => *guard = Arc::clone(&snapshot),
            Err(poisoned) => *poisoned.into_inner() = Arc::clone(&snapshot),
        }

        info!(
            source = %self.source.describe(),
            count = snapshot.reports.len(),
            "report feed refreshed"
        );
        Ok(snapshot)
    }

    pub fn status(&self) -> FeedStatus {
        let snapshot = self.snapshot();
        FeedStatus {
            source: self.source.describe(),
            refreshing: self.refreshing.load(Ordering::Acquire),
            last_refreshed_at: snapshot.refreshed_at,
            cached_reports: snapshot.reports.len(),
            scheduled_interval_minutes: self.scheduled_interval_minutes,
        }
    }
}

struct RefreshGuard<'a>(&'a AtomicBool);

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn optional_timestamp<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match value {
        Some(value) => iso_timestamp::serialize(value, serializer),
        None => serializer.serialize_none(),
    }
}
