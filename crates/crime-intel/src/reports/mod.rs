//! Crime-report aggregation: filtering, ordering, analytics, and export over
//! in-memory batches, plus the import and feed plumbing that produces them.

pub mod analytics;
pub mod classify;
mod criteria;
pub mod domain;
mod export;
pub mod feed;
pub mod import;
mod ordering;

#[cfg(test)]
pub(crate) mod test_support;

pub use analytics::{summarize, summarize_at, ReportAnalytics, TimeRange};
pub use criteria::{filter, DateRange, ReportCriteria};
pub use domain::{CrimeCategory, NewsSource, Region, Report};
pub use export::{export, export_as, ExportError, ExportFormat, ExportedReports, CSV_HEADER};
pub use feed::{FeedError, FeedStatus, FileReportSource, ReportFeed, ReportSource, StaticReportSource};
pub use import::{ImportError, ReportImporter};
pub use ordering::{sort, InvalidSortOption, SortDirection, SortKey};
