mod insights;
mod summary;

pub use insights::{BreakdownEntry, DEFAULT_TOP_REGIONS};
pub use summary::{summarize, summarize_at, ReportAnalytics, TimeRange};
