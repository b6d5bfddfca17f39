//! Keyword heuristics for tagging raw headlines.

use super::domain::{CrimeCategory, Region};

pub const CRIME_KEYWORDS: [&str; 14] = [
    "crime",
    "arrest",
    "police",
    "criminal",
    "theft",
    "robbery",
    "kidnap",
    "fraud",
    "corruption",
    "murder",
    "trafficking",
    "terrorism",
    "attack",
    "security",
];

pub fn detect_category(text: &str) -> CrimeCategory {
    let haystack = text.to_lowercase();
    CrimeCategory::ordered()
        .into_iter()
        .find(|category| haystack.contains(&category.label().to_lowercase()))
        .unwrap_or(CrimeCategory::Other)
}

/// First state whose label appears as whole words, so "Nigeria" never reads as Niger.
pub fn detect_region(text: &str) -> Region {
    let tokens = words(text);
    Region::ordered()
        .into_iter()
        .find(|region| contains_phrase(&tokens, &words(region.label())))
        .unwrap_or(Region::Unknown)
}

pub fn is_crime_related(text: &str) -> bool {
    let haystack = text.to_lowercase();
    CRIME_KEYWORDS
        .iter()
        .any(|keyword| haystack.contains(keyword))
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn contains_phrase(words: &[String], phrase: &[String]) -> bool {
    !phrase.is_empty() && words.windows(phrase.len()).any(|window| window == phrase)
}
