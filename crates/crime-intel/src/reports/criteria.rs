use super::domain::{CrimeCategory, Region, Report};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Conjunctive filter predicates; every `None`/empty field is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCriteria {
    #[serde(default)]
    pub search_term: Option<String>,
    #[serde(default)]
    pub category: Option<CrimeCategory>,
    #[serde(default)]
    pub state: Option<Region>,
    #[serde(default)]
    pub date_range: DateRange,
}

/// Inclusive bounds on `Report::date`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Whole-day bounds: `start` at midnight, `end` at its last millisecond.
    pub fn from_days(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            start: start.map(day_start),
            end: end.map(day_end),
        }
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.start.map_or(true, |start| *instant >= start)
            && self.end.map_or(true, |end| *instant <= end)
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

pub(crate) fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

pub(crate) fn day_end(date: NaiveDate) -> DateTime<Utc> {
    match date.succ_opt() {
        Some(next) => day_start(next) - Duration::milliseconds(1),
        None => day_start(date),
    }
}

impl ReportCriteria {
    pub fn matches(&self, report: &Report) -> bool {
        self.matches_search(report)
            && self.category.map_or(true, |category| report.category == category)
            && self.state.map_or(true, |state| report.state == state)
            && self.date_range.contains(&report.date)
    }

    pub fn is_empty(&self) -> bool {
        self.normalized_search().is_none()
            && self.category.is_none()
            && self.state.is_none()
            && self.date_range.is_unbounded()
    }

    fn normalized_search(&self) -> Option<String> {
        self.search_term
            .as_deref()
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }

    fn matches_search(&self, report: &Report) -> bool {
        match self.normalized_search() {
            Some(term) => {
                report.title.to_lowercase().contains(&term)
                    || report.summary.to_lowercase().contains(&term)
            }
            None => true,
        }
    }
}

/// Returns the reports satisfying every criterion, in input order.
pub fn filter(reports: &[Report], criteria: &ReportCriteria) -> Vec<Report> {
    if criteria.is_empty() {
        return reports.to_vec();
    }

    reports
        .iter()
        .filter(|report| criteria.matches(report))
        .cloned()
        .collect()
}
