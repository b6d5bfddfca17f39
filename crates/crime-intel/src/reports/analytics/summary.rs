use super::super::domain::{iso_timestamp, CrimeCategory, Region, Report};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate statistics over a report batch.
///
/// Breakdowns are sparse: only values observed at least once get an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportAnalytics {
    pub total_reports: usize,
    pub category_breakdown: BTreeMap<CrimeCategory, usize>,
    #[serde(rename = "geographicalDistribution")]
    pub state_breakdown: BTreeMap<Region, usize>,
    #[serde(rename = "sourcesBreakdown")]
    pub source_breakdown: BTreeMap<String, usize>,
    pub time_range: TimeRange,
    pub verified_count: usize,
    /// Percentage of verified reports, rounded to two decimals.
    pub verified_percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    #[serde(with = "iso_timestamp")]
    pub start: DateTime<Utc>,
    #[serde(with = "iso_timestamp")]
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn collapsed(at: DateTime<Utc>) -> Self {
        Self { start: at, end: at }
    }
}

impl ReportAnalytics {
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            total_reports: 0,
            category_breakdown: BTreeMap::new(),
            state_breakdown: BTreeMap::new(),
            source_breakdown: BTreeMap::new(),
            time_range: TimeRange::collapsed(now),
            verified_count: 0,
            verified_percentage: 0.0,
        }
    }
}

/// Summarizes `reports` using the current wall clock for empty input.
pub fn summarize(reports: &[Report]) -> ReportAnalytics {
    summarize_at(reports, Utc::now())
}

pub fn summarize_at(reports: &[Report], now: DateTime<Utc>) -> ReportAnalytics {
    let Some(first) = reports.first() else {
        return ReportAnalytics::empty(now);
    };

    let mut analytics = ReportAnalytics::empty(now);
    analytics.time_range = TimeRange::collapsed(first.date);

    for report in reports {
        *analytics
            .category_breakdown
            .entry(report.category)
            .or_default() += 1;
        *analytics.state_breakdown.entry(report.state).or_default() += 1;
        *analytics
            .source_breakdown
            .entry(report.source.clone())
            .or_default() += 1;

        if report.verified {
            analytics.verified_count += 1;
        }

        let range = &mut analytics.time_range;
        range.start = range.start.min(report.date);
        range.end = range.end.max(report.date);
    }

    analytics.total_reports = reports.len();
    analytics.verified_percentage = percentage(analytics.verified_count, reports.len());
    analytics
}

pub(crate) fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }

    let ratio = part as f64 * 100.0 / total as f64;
    (ratio * 100.0).round() / 100.0
}
