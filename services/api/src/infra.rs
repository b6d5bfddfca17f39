use chrono::{DateTime, NaiveDate, Utc};
use crime_intel::error::AppError;
use crime_intel::reports::domain::parse_timestamp;
use crime_intel::reports::{
    CrimeCategory, DateRange, ExportFormat, Region, ReportCriteria, ReportFeed, SortDirection,
    SortKey,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) feed: Arc<ReportFeed>,
}

/// Query parameters shared by the report, analytics, and export endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReportQuery {
    #[serde(default)]
    pub(crate) search_term: Option<String>,
    #[serde(default)]
    pub(crate) category: Option<String>,
    #[serde(default)]
    pub(crate) state: Option<String>,
    #[serde(default)]
    pub(crate) start: Option<String>,
    #[serde(default)]
    pub(crate) end: Option<String>,
    #[serde(default)]
    pub(crate) sort_by: Option<String>,
    #[serde(default)]
    pub(crate) direction: Option<String>,
    #[serde(default)]
    pub(crate) format: Option<String>,
}

impl ReportQuery {
    pub(crate) fn criteria(&self) -> Result<ReportCriteria, AppError> {
        let category = parse_selection(self.category.as_deref())
            .map(str::parse::<CrimeCategory>)
            .transpose()
            .map_err(|err| AppError::InvalidQuery(err.to_string()))?;
        let state = parse_selection(self.state.as_deref())
            .map(str::parse::<Region>)
            .transpose()
            .map_err(|err| AppError::InvalidQuery(err.to_string()))?;

        Ok(ReportCriteria {
            search_term: self.search_term.clone().filter(|term| !term.is_empty()),
            category,
            state,
            date_range: DateRange {
                start: parse_bound(self.start.as_deref(), Bound::Start)?,
                end: parse_bound(self.end.as_deref(), Bound::End)?,
            },
        })
    }

    pub(crate) fn ordering(&self) -> Result<(SortKey, SortDirection), AppError> {
        let key = match non_empty(self.sort_by.as_deref()) {
            Some(raw) => raw.parse()?,
            None => SortKey::default(),
        };
        let direction = match non_empty(self.direction.as_deref()) {
            Some(raw) => raw.parse()?,
            None => SortDirection::default(),
        };
        Ok((key, direction))
    }

    pub(crate) fn export_format(&self) -> Result<ExportFormat, AppError> {
        match non_empty(self.format.as_deref()) {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(ExportFormat::Json),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Treats an empty value or "any" as no constraint.
pub(crate) fn parse_selection(value: Option<&str>) -> Option<&str> {
    non_empty(value).filter(|value| !value.eq_ignore_ascii_case("any"))
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Start,
    End,
}

fn parse_bound(value: Option<&str>, bound: Bound) -> Result<Option<DateTime<Utc>>, AppError> {
    let Some(raw) = non_empty(value) else {
        return Ok(None);
    };

    if let Ok(day) = parse_date(raw) {
        let range = match bound {
            Bound::Start => DateRange::from_days(Some(day), None),
            Bound::End => DateRange::from_days(None, Some(day)),
        };
        return Ok(range.start.or(range.end));
    }

    parse_timestamp(raw)
        .map(Some)
        .map_err(|err| AppError::InvalidQuery(err.to_string()))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_category(raw: &str) -> Result<CrimeCategory, String> {
    raw.parse::<CrimeCategory>().map_err(|err| err.to_string())
}

pub(crate) fn parse_region(raw: &str) -> Result<Region, String> {
    raw.parse::<Region>().map_err(|err| err.to_string())
}

/// Reloads the feed on a fixed cadence until the runtime shuts down.
pub(crate) fn spawn_scheduled_refresh(
    feed: Arc<ReportFeed>,
) -> Option<tokio::task::JoinHandle<()>> {
    let minutes = feed.scheduled_interval_minutes()?;
    let period = Duration::from_secs(minutes.saturating_mul(60));

    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // First tick completes immediately; startup already loaded the feed.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let feed = Arc::clone(&feed);
            match tokio::task::spawn_blocking(move || feed.refresh()).await {
                Ok(Ok(snapshot)) => {
                    debug!(count = snapshot.reports.len(), "scheduled refresh completed")
                }
                Ok(Err(err)) => warn!(error = %err, "scheduled refresh skipped"),
                Err(err) => warn!(error = %err, "scheduled refresh task failed"),
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crime_intel::reports::feed::SourceError;
    use crime_intel::reports::{Report, ReportSource, StaticReportSource};
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    #[test]
    fn any_and_blank_selections_are_ignored() {
        let query = ReportQuery {
            category: Some("any".to_string()),
            state: Some("  ".to_string()),
            search_term: Some(String::new()),
            ..ReportQuery::default()
        };
        let criteria = query.criteria().expect("criteria build");
        assert!(criteria.is_empty());
    }

    #[test]
    fn date_only_bounds_cover_whole_days() {
        let query = ReportQuery {
            start: Some("2025-03-01".to_string()),
            end: Some("2025-03-02".to_string()),
            ..ReportQuery::default()
        };
        let range = query.criteria().expect("criteria build").date_range;
        assert_eq!(range.start, Some(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()));
        assert_eq!(
            range.end,
            Some(
                Utc.with_ymd_and_hms(2025, 3, 2, 23, 59, 59).unwrap()
                    + chrono::Duration::milliseconds(999)
            )
        );
    }

    #[test]
    fn unknown_labels_are_rejected() {
        let query = ReportQuery {
            state: Some("Atlantis".to_string()),
            ..ReportQuery::default()
        };
        assert!(matches!(query.criteria(), Err(AppError::InvalidQuery(_))));
    }

    #[test]
    fn zero_schedule_spawns_nothing() {
        let feed = ReportFeed::new(Arc::new(StaticReportSource::default())).with_schedule(Some(0));
        assert!(spawn_scheduled_refresh(Arc::new(feed)).is_none());

        let feed = ReportFeed::new(Arc::new(StaticReportSource::default()));
        assert!(spawn_scheduled_refresh(Arc::new(feed)).is_none());
    }

    #[derive(Default)]
    struct CountingSource {
        fetches: AtomicUsize,
    }

    impl ReportSource for CountingSource {
        fn fetch(&self) -> Result<Vec<Report>, SourceError> {
            self.fetches.fetch_add(1, AtomicOrdering::SeqCst);
            Ok(Vec::new())
        }

        fn describe(&self) -> String {
            "counting".to_string()
        }
    }

    async fn wait_for_fetches(source: &CountingSource, expected: usize) {
        for _ in 0..120 {
            if source.fetches.load(AtomicOrdering::SeqCst) >= expected {
                return;
            }
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn scheduled_refresh_reloads_after_each_period() {
        let source = Arc::new(CountingSource::default());
        let feed = Arc::new(ReportFeed::new(source.clone()).with_schedule(Some(1)));
        let handle = spawn_scheduled_refresh(Arc::clone(&feed)).expect("schedule is enabled");

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(source.fetches.load(AtomicOrdering::SeqCst), 0, "first tick is skipped");
        assert!(feed.status().last_refreshed_at.is_none());

        wait_for_fetches(&source, 1).await;
        assert_eq!(source.fetches.load(AtomicOrdering::SeqCst), 1);
        assert!(feed.status().last_refreshed_at.is_some());

        wait_for_fetches(&source, 2).await;
        assert_eq!(source.fetches.load(AtomicOrdering::SeqCst), 2);

        handle.abort();
    }

    #[test]
    fn ordering_defaults_to_newest_first() {
        let (key, direction) = ReportQuery::default().ordering().expect("defaults parse");
        assert_eq!(key, SortKey::Date);
        assert_eq!(direction, SortDirection::Descending);

        let query = ReportQuery {
            sort_by: Some("source".to_string()),
            ..ReportQuery::default()
        };
        assert!(query.ordering().is_err());
    }
}
