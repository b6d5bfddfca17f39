use crate::infra::{parse_category, parse_date, parse_region};
use chrono::NaiveDate;
use clap::Args;
use crime_intel::error::AppError;
use crime_intel::reports::analytics::DEFAULT_TOP_REGIONS;
use crime_intel::reports::domain::format_timestamp;
use crime_intel::reports::{
    export, filter, sort, summarize, CrimeCategory, DateRange, ExportFormat, Region,
    ReportAnalytics, ReportCriteria, ReportImporter, SortDirection, SortKey,
};
use std::path::PathBuf;

#[derive(Args, Debug, Default, Clone)]
pub(crate) struct FilterArgs {
    /// Case-insensitive text to look for in titles and summaries
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Only include this crime category (e.g. "Armed Robbery")
    #[arg(long, value_parser = parse_category)]
    pub(crate) category: Option<CrimeCategory>,
    /// Only include this state (e.g. "Lagos", "FCT")
    #[arg(long, value_parser = parse_region)]
    pub(crate) state: Option<Region>,
    /// Earliest report date, inclusive (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) from: Option<NaiveDate>,
    /// Latest report date, inclusive (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) to: Option<NaiveDate>,
}

impl FilterArgs {
    pub(crate) fn criteria(&self) -> ReportCriteria {
        ReportCriteria {
            search_term: self.search.clone(),
            category: self.category,
            state: self.state,
            date_range: DateRange::from_days(self.from, self.to),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct SummaryArgs {
    /// Report batch to summarize (.json or .csv)
    #[arg(long)]
    pub(crate) input: PathBuf,
    #[command(flatten)]
    pub(crate) filters: FilterArgs,
    /// Also list the matching reports, newest first
    #[arg(long)]
    pub(crate) list_reports: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Report batch to export (.json or .csv)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Output format: json or csv
    #[arg(long, default_value = "json")]
    pub(crate) format: String,
    /// Destination file (defaults to stdout)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    #[command(flatten)]
    pub(crate) filters: FilterArgs,
    /// Sort key: date, category, or state
    #[arg(long, default_value = "date")]
    pub(crate) sort_by: String,
    /// Sort direction: asc or desc
    #[arg(long, default_value = "desc")]
    pub(crate) direction: String,
}

pub(crate) fn run_summary(args: SummaryArgs) -> Result<(), AppError> {
    let SummaryArgs {
        input,
        filters,
        list_reports,
    } = args;

    let reports = ReportImporter::from_path(&input)?;
    let matching = filter(&reports, &filters.criteria());
    let analytics = summarize(&matching);

    println!("Crime report summary");
    println!(
        "Source: {} ({} of {} reports match)",
        input.display(),
        matching.len(),
        reports.len()
    );
    render_analytics(&analytics);

    if list_reports {
        println!("\nReports (newest first)");
        for report in sort(&matching, SortKey::Date, SortDirection::Descending) {
            let verified = if report.verified { "verified" } else { "unverified" };
            println!(
                "- {} | {} | {} | {} | {} | {}",
                format_timestamp(&report.date),
                report.category,
                report.state,
                report.source,
                verified,
                report.title
            );
        }
    }

    Ok(())
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let format = args.format.parse::<ExportFormat>()?;
    let key = args.sort_by.parse::<SortKey>()?;
    let direction = args.direction.parse::<SortDirection>()?;

    let reports = ReportImporter::from_path(&args.input)?;
    let matching = filter(&reports, &args.filters.criteria());
    let exported = export(&sort(&matching, key, direction), format)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, exported.body.as_bytes())?;
            eprintln!(
                "Wrote {} reports to {} ({})",
                matching.len(),
                path.display(),
                exported.content_type()
            );
        }
        None => println!("{}", exported.body),
    }

    Ok(())
}

fn render_analytics(analytics: &ReportAnalytics) {
    println!("\nTotal reports: {}", analytics.total_reports);
    println!(
        "Verified: {} ({:.2}%)",
        analytics.verified_count, analytics.verified_percentage
    );
    println!(
        "Time range: {} -> {}",
        format_timestamp(&analytics.time_range.start),
        format_timestamp(&analytics.time_range.end)
    );

    match analytics.dominant_category() {
        Some((category, count)) => println!("Most reported category: {category} ({count})"),
        None => println!("Most reported category: N/A"),
    }

    if analytics.category_breakdown.is_empty() {
        println!("\nCategories: none");
    } else {
        println!("\nCategories");
        for entry in analytics.category_entries() {
            println!("- {}: {}", entry.name, entry.value);
        }
    }

    let regions = analytics.top_regions(DEFAULT_TOP_REGIONS);
    if regions.is_empty() {
        println!("\nTop states: none");
    } else {
        println!("\nTop states");
        for (region, count) in regions {
            println!("- {region}: {count}");
        }
    }

    if !analytics.source_breakdown.is_empty() {
        println!("\nSources");
        for entry in analytics.source_entries() {
            println!("- {}: {}", entry.name, entry.value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn filter_args_translate_to_whole_day_criteria() {
        let args = FilterArgs {
            search: Some("ring".to_string()),
            category: Some(CrimeCategory::Fraud),
            state: None,
            from: NaiveDate::from_ymd_opt(2025, 3, 1),
            to: None,
        };

        let criteria = args.criteria();
        assert_eq!(criteria.category, Some(CrimeCategory::Fraud));
        assert_eq!(
            criteria.date_range.start,
            Some(chrono::Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap())
        );
        assert!(criteria.date_range.end.is_none());
    }

    #[test]
    fn export_rejects_unknown_formats_before_reading_input() {
        let args = ExportArgs {
            input: PathBuf::from("does-not-exist.json"),
            format: "yaml".to_string(),
            output: None,
            filters: FilterArgs::default(),
            sort_by: "date".to_string(),
            direction: "desc".to_string(),
        };

        let err = run_export(args).expect_err("yaml unsupported");
        assert!(matches!(err, AppError::Export(_)));
    }
}
