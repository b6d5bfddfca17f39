mod parser;

use super::domain::Report;
use super::export::ExportFormat;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::debug;

pub use parser::RowError;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read report batch: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid report JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid report CSV: {0}")]
    Csv(#[from] RowError),
    #[error("duplicate report id '{0}' in batch")]
    DuplicateId(String),
    #[error("cannot infer report format from '{0}' (expected .json or .csv)")]
    UnknownExtension(String),
}

/// Loads report batches in either export shape.
pub struct ReportImporter;

impl ReportImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Report>, ImportError> {
        let path = path.as_ref();
        let format = Self::format_for(path)?;
        let file = std::fs::File::open(path)?;
        let reports = Self::from_reader(file, format)?;
        debug!(path = %path.display(), count = reports.len(), "imported report batch");
        Ok(reports)
    }

    pub fn from_reader<R: Read>(reader: R, format: ExportFormat) -> Result<Vec<Report>, ImportError> {
        let reports = match format {
            ExportFormat::Json => {
                let mut reports: Vec<Report> = serde_json::from_reader(reader)?;
                parser::backfill_source_urls(&mut reports);
                reports
            }
            ExportFormat::Csv => parser::parse_csv(reader)?,
        };

        ensure_unique_ids(&reports)?;
        Ok(reports)
    }

    fn format_for(path: &Path) -> Result<ExportFormat, ImportError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse::<ExportFormat>().ok())
            .ok_or_else(|| ImportError::UnknownExtension(path.display().to_string()))
    }
}

fn ensure_unique_ids(reports: &[Report]) -> Result<(), ImportError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(reports.len());
    for report in reports {
        if !seen.insert(report.id.as_str()) {
            return Err(ImportError::DuplicateId(report.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::domain::{CrimeCategory, Region};

    #[test]
    fn csv_rows_infer_missing_labels() {
        let csv = "id,title,source,date,category,state,summary,verified\n\
g-1,Kidnapping alert issued for Zamfara residents,The Guardian Nigeria,2025-03-01T10:00:00.000Z,,,Operations are ongoing.,true\n\
g-2,Unrelated headline,The Guardian Nigeria,2025-03-02,,,Nothing to see.,false\n\
g-3,Fraud cases rise across Nigeria,Premium Times,2025-03-03,,,Banks in Nigeria issue warnings.,false\n";

        let reports =
            ReportImporter::from_reader(csv.as_bytes(), ExportFormat::Csv).expect("csv imports");
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].category, CrimeCategory::Kidnapping);
        assert_eq!(reports[0].state, Region::Zamfara);
        assert_eq!(reports[0].source_url, "https://guardian.ng");
        assert_eq!(reports[1].category, CrimeCategory::Other);
        assert_eq!(reports[1].state, Region::Unknown);
        assert_eq!(reports[2].category, CrimeCategory::Fraud);
        assert_eq!(reports[2].state, Region::Unknown);
    }

    #[test]
    fn csv_rows_reject_unknown_labels() {
        let csv = "id,title,source,date,category,state,summary,verified\n\
x-1,Title,ThisDay,2025-03-01,Piracy,Lagos,Summary,true\n";

        let err = ReportImporter::from_reader(csv.as_bytes(), ExportFormat::Csv)
            .expect_err("unknown category rejected");
        assert!(err.to_string().contains("Piracy"));
    }

    #[test]
    fn malformed_dates_fail_the_import() {
        let csv = "id,title,source,date,category,state,summary,verified\n\
x-1,Title,ThisDay,last tuesday,Fraud,Lagos,Summary,true\n";

        let err = ReportImporter::from_reader(csv.as_bytes(), ExportFormat::Csv)
            .expect_err("bad date rejected");
        assert!(matches!(
            err,
            ImportError::Csv(RowError::Timestamp { row: 1, .. })
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"[
            {"id":"dup","title":"a","source":"ThisDay","date":"2025-03-01","category":"Fraud","state":"Lagos","summary":"s","verified":true},
            {"id":"dup","title":"b","source":"ThisDay","date":"2025-03-02","category":"Fraud","state":"Lagos","summary":"s","verified":false}
        ]"#;

        let err = ReportImporter::from_reader(json.as_bytes(), ExportFormat::Json)
            .expect_err("duplicate ids rejected");
        assert!(matches!(err, ImportError::DuplicateId(ref id) if id == "dup"));
    }

    #[test]
    fn json_import_backfills_known_source_urls() {
        let json = r#"[{"id":"t-1","title":"a","source":"ThisDay","date":"2025-03-01","category":"Fraud","state":"Lagos","summary":"s","verified":true}]"#;

        let reports = ReportImporter::from_reader(json.as_bytes(), ExportFormat::Json)
            .expect("json imports");
        assert_eq!(reports[0].source_url, "https://www.thisdaylive.com");
    }

    #[test]
    fn unknown_extension_is_reported() {
        let err = ReportImporter::from_path("reports.xml").expect_err("xml rejected");
        assert!(matches!(err, ImportError::UnknownExtension(_)));
    }
}
