use super::super::classify::{detect_category, detect_region};
use super::super::domain::{parse_timestamp, NewsSource, Report, TimestampError, UnknownLabel};
use super::super::export::CsvRow;
use std::io::Read;

#[derive(Debug, thiserror::Error)]
pub enum RowError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("row {row}: {source}")]
    Timestamp { row: usize, source: TimestampError },
    #[error("row {row}: {source}")]
    Label { row: usize, source: UnknownLabel },
}

pub(crate) fn parse_csv<R: Read>(reader: R) -> Result<Vec<Report>, RowError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let mut reports = Vec::new();

    for (index, record) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let row = index + 1;
        reports.push(into_report(record?, row)?);
    }

    Ok(reports)
}

fn into_report(row: CsvRow, line: usize) -> Result<Report, RowError> {
    let date = parse_timestamp(&row.date).map_err(|source| RowError::Timestamp {
        row: line,
        source,
    })?;

    let text = format!("{} {}", row.title, row.summary);
    let category = if row.category.trim().is_empty() {
        detect_category(&text)
    } else {
        row.category
            .parse()
            .map_err(|source| RowError::Label { row: line, source })?
    };
    let state = if row.state.trim().is_empty() {
        detect_region(&text)
    } else {
        row.state
            .parse()
            .map_err(|source| RowError::Label { row: line, source })?
    };

    let source_url = NewsSource::lookup(&row.source)
        .map(|source| source.url.to_string())
        .unwrap_or_default();

    Ok(Report {
        id: row.id,
        title: row.title,
        source: row.source,
        source_url,
        date,
        category,
        state,
        summary: row.summary,
        verified: row.verified,
    })
}

/// Fills in publisher URLs the JSON payload left blank.
pub(crate) fn backfill_source_urls(reports: &mut [Report]) {
    for report in reports.iter_mut().filter(|report| report.source_url.is_empty()) {
        if let Some(source) = NewsSource::lookup(&report.source) {
            report.source_url = source.url.to_string();
        }
    }
}
