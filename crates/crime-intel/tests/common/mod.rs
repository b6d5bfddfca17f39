#![allow(dead_code)]

use chrono::{DateTime, Utc};
use crime_intel::reports::{domain::parse_timestamp, CrimeCategory, Region, Report};

pub fn timestamp(value: &str) -> DateTime<Utc> {
    parse_timestamp(value).expect("valid fixture timestamp")
}

pub fn report(
    id: &str,
    category: CrimeCategory,
    state: Region,
    date: &str,
    verified: bool,
) -> Report {
    Report {
        id: id.to_string(),
        title: format!("{} incident reported in {}", category, state),
        source: "Vanguard News".to_string(),
        source_url: "https://www.vanguardngr.com".to_string(),
        date: timestamp(date),
        category,
        state,
        summary: format!(
            "Authorities in {} are investigating a {} incident.",
            state,
            category.label().to_lowercase()
        ),
        verified,
    }
}

pub fn sample_batch() -> Vec<Report> {
    vec![
        report("v-1", CrimeCategory::Fraud, Region::Lagos, "2025-03-01T08:00:00Z", true),
        report("v-2", CrimeCategory::Fraud, Region::Kano, "2025-03-01T08:00:00Z", false),
        report("v-3", CrimeCategory::Assault, Region::Lagos, "2025-03-02T14:30:00Z", true),
        report("v-4", CrimeCategory::Kidnapping, Region::Zamfara, "2025-03-04T19:45:00Z", true),
        report("v-5", CrimeCategory::Corruption, Region::Fct, "2025-03-01T08:00:00Z", false),
        report("v-6", CrimeCategory::Cybercrime, Region::Lagos, "2025-03-03T11:10:00Z", true),
    ]
}
