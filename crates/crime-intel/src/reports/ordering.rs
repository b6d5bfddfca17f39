use super::domain::Report;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Date,
    Category,
    State,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortKey {
    fn compare(self, left: &Report, right: &Report) -> Ordering {
        match self {
            Self::Date => left.date.cmp(&right.date),
            Self::Category => left.category.label().cmp(right.category.label()),
            Self::State => left.state.label().cmp(right.state.label()),
        }
    }
}

impl FromStr for SortKey {
    type Err = InvalidSortOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "category" => Ok(Self::Category),
            "state" => Ok(Self::State),
            other => Err(InvalidSortOption::new("sort key", other)),
        }
    }
}

impl FromStr for SortDirection {
    type Err = InvalidSortOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(InvalidSortOption::new("sort direction", other)),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => f.write_str("asc"),
            Self::Descending => f.write_str("desc"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported {kind} '{value}'")]
pub struct InvalidSortOption {
    pub kind: &'static str,
    pub value: String,
}

impl InvalidSortOption {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Stable sort; ties keep their input order in both directions.
pub fn sort(reports: &[Report], key: SortKey, direction: SortDirection) -> Vec<Report> {
    let mut sorted = reports.to_vec();
    sorted.sort_by(|left, right| match direction {
        SortDirection::Ascending => key.compare(left, right),
        SortDirection::Descending => key.compare(right, left),
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::domain::{CrimeCategory, Region};
    use crate::reports::test_support::report;

    fn ids(reports: &[Report]) -> Vec<&str> {
        reports.iter().map(|report| report.id.as_str()).collect()
    }

    fn fixtures() -> Vec<Report> {
        vec![
            report("a", CrimeCategory::Violence, Region::Oyo, "2025-03-02T10:00:00Z", true),
            report("b", CrimeCategory::ArmedRobbery, Region::AkwaIbom, "2025-03-01T10:00:00Z", true),
            report("c", CrimeCategory::Fraud, Region::Oyo, "2025-03-02T10:00:00Z", false),
            report("d", CrimeCategory::ArmedRobbery, Region::Zamfara, "2025-03-03T10:00:00Z", true),
            report("e", CrimeCategory::Cybercrime, Region::AkwaIbom, "2025-03-02T10:00:00Z", false),
        ]
    }

    #[test]
    fn dates_sort_by_instant() {
        let reports = fixtures();
        let ascending = sort(&reports, SortKey::Date, SortDirection::Ascending);
        assert_eq!(ids(&ascending), vec!["b", "a", "c", "e", "d"]);

        let descending = sort(&reports, SortKey::Date, SortDirection::Descending);
        assert_eq!(ids(&descending), vec!["d", "a", "c", "e", "b"]);
    }

    #[test]
    fn descending_then_ascending_keeps_equal_dates_in_input_order() {
        let reports = fixtures();
        let descending = sort(&reports, SortKey::Date, SortDirection::Descending);
        let restored = sort(&descending, SortKey::Date, SortDirection::Ascending);
        assert_eq!(ids(&restored), vec!["b", "a", "c", "e", "d"]);
    }

    #[test]
    fn categories_compare_by_label() {
        let reports = fixtures();
        let sorted = sort(&reports, SortKey::Category, SortDirection::Ascending);
        assert_eq!(ids(&sorted), vec!["b", "d", "e", "c", "a"]);
    }

    #[test]
    fn states_sort_descending_with_stable_ties() {
        let reports = fixtures();
        let sorted = sort(&reports, SortKey::State, SortDirection::Descending);
        assert_eq!(ids(&sorted), vec!["d", "a", "c", "b", "e"]);
    }

    #[test]
    fn options_parse_from_query_strings() {
        assert_eq!("Category".parse::<SortKey>(), Ok(SortKey::Category));
        assert_eq!("asc".parse::<SortDirection>(), Ok(SortDirection::Ascending));
        assert_eq!(
            "descending".parse::<SortDirection>(),
            Ok(SortDirection::Descending)
        );
        assert!("source".parse::<SortKey>().is_err());
    }
}
