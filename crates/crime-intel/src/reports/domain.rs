use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single crime-news item as published by one of the monitored outlets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub title: String,
    pub source: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(with = "iso_timestamp")]
    pub date: DateTime<Utc>,
    pub category: CrimeCategory,
    pub state: Region,
    pub summary: String,
    pub verified: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CrimeCategory {
    Cybercrime,
    #[serde(rename = "Armed Robbery")]
    ArmedRobbery,
    Kidnapping,
    Fraud,
    #[serde(rename = "Drug Trafficking")]
    DrugTrafficking,
    Violence,
    Terrorism,
    Corruption,
    Vandalism,
    Assault,
    Other,
}

impl CrimeCategory {
    /// Every concrete category, excluding the `Other` sentinel.
    pub const fn ordered() -> [Self; 10] {
        [
            Self::Cybercrime,
            Self::ArmedRobbery,
            Self::Kidnapping,
            Self::Fraud,
            Self::DrugTrafficking,
            Self::Violence,
            Self::Terrorism,
            Self::Corruption,
            Self::Vandalism,
            Self::Assault,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Cybercrime => "Cybercrime",
            Self::ArmedRobbery => "Armed Robbery",
            Self::Kidnapping => "Kidnapping",
            Self::Fraud => "Fraud",
            Self::DrugTrafficking => "Drug Trafficking",
            Self::Violence => "Violence",
            Self::Terrorism => "Terrorism",
            Self::Corruption => "Corruption",
            Self::Vandalism => "Vandalism",
            Self::Assault => "Assault",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for CrimeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CrimeCategory {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ordered()
            .into_iter()
            .chain([Self::Other])
            .find(|category| category.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownLabel::category(trimmed))
    }
}

/// Nigerian states plus the Federal Capital Territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    Abia,
    Adamawa,
    #[serde(rename = "Akwa Ibom")]
    AkwaIbom,
    Anambra,
    Bauchi,
    Bayelsa,
    Benue,
    Borno,
    #[serde(rename = "Cross River")]
    CrossRiver,
    Delta,
    Ebonyi,
    Edo,
    Ekiti,
    Enugu,
    #[serde(rename = "FCT")]
    Fct,
    Gombe,
    Imo,
    Jigawa,
    Kaduna,
    Kano,
    Katsina,
    Kebbi,
    Kogi,
    Kwara,
    Lagos,
    Nasarawa,
    Niger,
    Ogun,
    Ondo,
    Osun,
    Oyo,
    Plateau,
    Rivers,
    Sokoto,
    Taraba,
    Yobe,
    Zamfara,
    Unknown,
}

impl Region {
    /// Every concrete region, excluding the `Unknown` sentinel.
    pub const fn ordered() -> [Self; 37] {
        [
            Self::Abia,
            Self::Adamawa,
            Self::AkwaIbom,
            Self::Anambra,
            Self::Bauchi,
            Self::Bayelsa,
            Self::Benue,
            Self::Borno,
            Self::CrossRiver,
            Self::Delta,
            Self::Ebonyi,
            Self::Edo,
            Self::Ekiti,
            Self::Enugu,
            Self::Fct,
            Self::Gombe,
            Self::Imo,
            Self::Jigawa,
            Self::Kaduna,
            Self::Kano,
            Self::Katsina,
            Self::Kebbi,
            Self::Kogi,
            Self::Kwara,
            Self::Lagos,
            Self::Nasarawa,
            Self::Niger,
            Self::Ogun,
            Self::Ondo,
            Self::Osun,
            Self::Oyo,
            Self::Plateau,
            Self::Rivers,
            Self::Sokoto,
            Self::Taraba,
            Self::Yobe,
            Self::Zamfara,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Abia => "Abia",
            Self::Adamawa => "Adamawa",
            Self::AkwaIbom => "Akwa Ibom",
            Self::Anambra => "Anambra",
            Self::Bauchi => "Bauchi",
            Self::Bayelsa => "Bayelsa",
            Self::Benue => "Benue",
            Self::Borno => "Borno",
            Self::CrossRiver => "Cross River",
            Self::Delta => "Delta",
            Self::Ebonyi => "Ebonyi",
            Self::Edo => "Edo",
            Self::Ekiti => "Ekiti",
            Self::Enugu => "Enugu",
            Self::Fct => "FCT",
            Self::Gombe => "Gombe",
            Self::Imo => "Imo",
            Self::Jigawa => "Jigawa",
            Self::Kaduna => "Kaduna",
            Self::Kano => "Kano",
            Self::Katsina => "Katsina",
            Self::Kebbi => "Kebbi",
            Self::Kogi => "Kogi",
            Self::Kwara => "Kwara",
            Self::Lagos => "Lagos",
            Self::Nasarawa => "Nasarawa",
            Self::Niger => "Niger",
            Self::Ogun => "Ogun",
            Self::Ondo => "Ondo",
            Self::Osun => "Osun",
            Self::Oyo => "Oyo",
            Self::Plateau => "Plateau",
            Self::Rivers => "Rivers",
            Self::Sokoto => "Sokoto",
            Self::Taraba => "Taraba",
            Self::Yobe => "Yobe",
            Self::Zamfara => "Zamfara",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Region {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ordered()
            .into_iter()
            .chain([Self::Unknown])
            .find(|region| region.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownLabel::region(trimmed))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownLabel {
    fn category(value: &str) -> Self {
        Self {
            kind: "crime category",
            value: value.to_string(),
        }
    }

    fn region(value: &str) -> Self {
        Self {
            kind: "state",
            value: value.to_string(),
        }
    }
}

/// Outlet monitored for crime coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NewsSource {
    pub id: &'static str,
    pub name: &'static str,
    pub url: &'static str,
}

impl NewsSource {
    pub const fn known() -> [Self; 6] {
        [
            Self {
                id: "punch",
                name: "Punch News",
                url: "https://punchng.com",
            },
            Self {
                id: "guardian",
                name: "The Guardian Nigeria",
                url: "https://guardian.ng",
            },
            Self {
                id: "vanguard",
                name: "Vanguard News",
                url: "https://www.vanguardngr.com",
            },
            Self {
                id: "dailytrust",
                name: "Daily Trust",
                url: "https://dailytrust.com",
            },
            Self {
                id: "thisday",
                name: "ThisDay",
                url: "https://www.thisdaylive.com",
            },
            Self {
                id: "nationonlineng",
                name: "The Nation",
                url: "https://thenationonlineng.net",
            },
        ]
    }

    /// Looks up a catalog entry by display name or id, ignoring ASCII case.
    pub fn lookup(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        Self::known().into_iter().find(|source| {
            source.name.eq_ignore_ascii_case(trimmed) || source.id.eq_ignore_ascii_case(trimmed)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not an RFC 3339 timestamp or YYYY-MM-DD date")]
pub struct TimestampError {
    pub value: String,
}

/// Parses RFC 3339 timestamps, falling back to bare dates at midnight UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, TimestampError> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TimestampError {
            value: trimmed.to_string(),
        })
}

/// RFC 3339 in UTC with at least millisecond precision; finer digits are kept.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    let format = if value.timestamp_subsec_nanos() % 1_000_000 == 0 {
        SecondsFormat::Millis
    } else {
        SecondsFormat::AutoSi
    };
    value.to_rfc3339_opts(format, true)
}

pub(crate) mod iso_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(value))
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}
