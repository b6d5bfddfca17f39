mod common;

use common::{report, sample_batch};
use crime_intel::reports::{
    export, export_as, CrimeCategory, ExportError, ExportFormat, FileReportSource, Region,
    ReportFeed, ReportImporter, ReportSource, CSV_HEADER,
};
use std::io::Write;
use std::sync::Arc;

#[test]
fn csv_export_round_trips_through_the_importer() {
    let mut reports = sample_batch();
    reports[0].title = r#"He said "run""#.to_string();
    reports[1].summary = "Three suspects, all armed, fled.\nPolice gave chase.".to_string();

    let exported = export(&reports, ExportFormat::Csv).expect("csv export");
    assert!(exported.body.starts_with(&CSV_HEADER.join(",")));
    assert!(exported.body.contains(r#""He said ""run""""#));

    let restored = ReportImporter::from_reader(exported.body.as_bytes(), ExportFormat::Csv)
        .expect("csv imports");
    assert_eq!(restored, reports);
}

#[test]
fn csv_rows_split_back_into_original_fields() {
    let mut single = report("g-9", CrimeCategory::Terrorism, Region::Borno, "2025-03-05T06:00:00Z", false);
    single.title = r#"He said "run""#.to_string();

    let exported = export(&[single.clone()], ExportFormat::Csv).expect("csv export");
    let mut reader = csv::Reader::from_reader(exported.body.as_bytes());
    let record = reader
        .records()
        .next()
        .expect("one row")
        .expect("row parses");

    assert_eq!(&record[0], "g-9");
    assert_eq!(&record[1], r#"He said "run""#);
    assert_eq!(&record[2], "Vanguard News");
    assert_eq!(&record[3], "2025-03-05T06:00:00.000Z");
    assert_eq!(&record[4], "Terrorism");
    assert_eq!(&record[5], "Borno");
    assert_eq!(&record[6], single.summary);
    assert_eq!(&record[7], "false");
}

#[test]
fn exports_keep_sub_millisecond_timestamps() {
    let json = r#"[{"id":"p-1","title":"Fraud ring busted","source":"Punch News","sourceUrl":"https://punchng.com","date":"2025-03-01T08:30:00.123456Z","category":"Fraud","state":"Lagos","summary":"Three held.","verified":true}]"#;
    let reports = ReportImporter::from_reader(json.as_bytes(), ExportFormat::Json)
        .expect("json imports");

    for format in [ExportFormat::Json, ExportFormat::Csv] {
        let exported = export(&reports, format).expect("export succeeds");
        assert!(exported.body.contains("2025-03-01T08:30:00.123456Z"));

        let restored = ReportImporter::from_reader(exported.body.as_bytes(), format)
            .expect("export re-imports");
        assert_eq!(restored, reports);
    }
}

#[test]
fn unsupported_format_is_a_distinct_error() {
    let err = export_as(&sample_batch(), "pdf").expect_err("pdf unsupported");
    assert!(matches!(err, ExportError::UnsupportedFormat(_)));
}

#[test]
fn file_source_feeds_exported_batches_back_in() {
    let reports = sample_batch();
    let exported = export(&reports, ExportFormat::Json).expect("json export");

    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("temp file");
    file.write_all(exported.body.as_bytes()).expect("write export");

    let source = FileReportSource::new(file.path());
    assert_eq!(source.fetch().expect("file loads"), reports);

    let feed = ReportFeed::new(Arc::new(source));
    let snapshot = feed.refresh().expect("feed refreshes");
    assert_eq!(snapshot.reports.len(), reports.len());
    assert!(feed.status().source.starts_with("file:"));
}

#[test]
fn bundled_sample_batch_loads_and_summarizes() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/sample-reports.json");
    let reports = ReportImporter::from_path(path).expect("sample batch loads");
    assert_eq!(reports.len(), 6);

    let analytics = crime_intel::reports::summarize(&reports);
    assert_eq!(analytics.state_breakdown.get(&Region::Lagos), Some(&2));
    assert_eq!(analytics.source_breakdown.len(), 6);
    assert_eq!(analytics.verified_percentage, 66.67);
}
