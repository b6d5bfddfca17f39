use super::domain::{format_timestamp, Report};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column order of the CSV export.
pub const CSV_HEADER: [&str; 8] = [
    "id", "title", "source", "date", "category", "state", "summary", "verified",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(ExportError::UnsupportedFormat(value.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),
    #[error("failed to encode JSON export: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to encode CSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV export was not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Finished export ready to be written or served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedReports {
    pub format: ExportFormat,
    pub body: String,
}

impl ExportedReports {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    pub fn file_name(&self) -> String {
        format!("crime-reports.{}", self.format.extension())
    }
}

/// Row layout shared by the exporter and the CSV importer.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CsvRow {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) source: String,
    pub(crate) date: String,
    pub(crate) category: String,
    pub(crate) state: String,
    pub(crate) summary: String,
    pub(crate) verified: bool,
}

impl From<&Report> for CsvRow {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id.clone(),
            title: report.title.clone(),
            source: report.source.clone(),
            date: format_timestamp(&report.date),
            category: report.category.label().to_string(),
            state: report.state.label().to_string(),
            summary: report.summary.clone(),
            verified: report.verified,
        }
    }
}

pub fn export(reports: &[Report], format: ExportFormat) -> Result<ExportedReports, ExportError> {
    let body = match format {
        ExportFormat::Json => serde_json::to_string_pretty(reports)?,
        ExportFormat::Csv => to_csv(reports)?,
    };

    Ok(ExportedReports { format, body })
}

/// Parses `format` first so unsupported values fail before any encoding.
pub fn export_as(reports: &[Report], format: &str) -> Result<ExportedReports, ExportError> {
    let format = format.parse::<ExportFormat>()?;
    export(reports, format)
}

fn to_csv(reports: &[Report]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for report in reports {
        writer.serialize(CsvRow::from(report))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Csv(csv::Error::from(err.into_error())))?;
    Ok(String::from_utf8(bytes)?)
}
