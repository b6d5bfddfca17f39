use super::domain::{parse_timestamp, CrimeCategory, Region, Report};

pub(crate) fn report(
    id: &str,
    category: CrimeCategory,
    state: Region,
    date: &str,
    verified: bool,
) -> Report {
    Report {
        id: id.to_string(),
        title: format!("Report {id}"),
        source: "Punch News".to_string(),
        source_url: "https://punchng.com".to_string(),
        date: parse_timestamp(date).expect("fixture timestamp parses"),
        category,
        state,
        summary: "No further details.".to_string(),
        verified,
    }
}

impl Report {
    pub(crate) fn titled(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub(crate) fn summarized(mut self, summary: &str) -> Self {
        self.summary = summary.to_string();
        self
    }

    pub(crate) fn from_source(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }
}
