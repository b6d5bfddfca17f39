use super::super::domain::{CrimeCategory, Region};
use super::summary::ReportAnalytics;
use serde::Serialize;

/// Number of regions the dashboard charts by default.
pub const DEFAULT_TOP_REGIONS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownEntry {
    pub name: String,
    pub value: usize,
}

impl ReportAnalytics {
    /// Regions ordered by report count, highest first; ties fall back to label order.
    pub fn top_regions(&self, limit: usize) -> Vec<(Region, usize)> {
        let mut ranked: Vec<(Region, usize)> = self
            .state_breakdown
            .iter()
            .map(|(region, count)| (*region, *count))
            .collect();
        ranked.sort_by(|left, right| {
            right
                .1
                .cmp(&left.1)
                .then_with(|| left.0.label().cmp(right.0.label()))
        });
        ranked.truncate(limit);
        ranked
    }

    /// Most frequent category, if any report was summarized.
    pub fn dominant_category(&self) -> Option<(CrimeCategory, usize)> {
        self.category_breakdown
            .iter()
            .map(|(category, count)| (*category, *count))
            .max_by(|left, right| {
                left.1
                    .cmp(&right.1)
                    .then_with(|| right.0.label().cmp(left.0.label()))
            })
    }

    pub fn category_entries(&self) -> Vec<BreakdownEntry> {
        self.category_breakdown
            .iter()
            .map(|(category, count)| BreakdownEntry {
                name: category.label().to_string(),
                value: *count,
            })
            .collect()
    }

    pub fn source_entries(&self) -> Vec<BreakdownEntry> {
        self.source_breakdown
            .iter()
            .map(|(source, count)| BreakdownEntry {
                name: source.clone(),
                value: *count,
            })
            .collect()
    }
}
