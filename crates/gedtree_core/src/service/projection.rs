//! Projection of parsed individuals into `ResolvedPerson` records.
//!
//! # Responsibility
//! - Derive years, age at death, title and description text.
//! - Attach scripture references and resolved notes.
//!
//! # Invariants
//! - Years come from the first run of 3-4 digits in a date string.
//! - Age at death is reported only when positive.

use crate::classify::PersonFilter;
use crate::model::document::GedcomDocument;
use crate::model::individual::Individual;
use crate::model::person::{FamilyTreeData, ResolvedPerson, VerseRef};
use once_cell::sync::Lazy;
use regex::Regex;

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{3,4}").expect("valid year regex"));

const VERSE_TABLE: &[(&str, &[(&str, &str)])] = &[
    (
        "adam",
        &[
            ("Genesis 2:7", "And the LORD God formed man of the dust of the ground..."),
            (
                "Genesis 5:5",
                "And all the days that Adam lived were nine hundred and thirty years...",
            ),
        ],
    ),
    (
        "eve",
        &[
            (
                "Genesis 2:22",
                "And the rib, which the LORD God had taken from man, made he a woman...",
            ),
            (
                "Genesis 3:20",
                "And Adam called his wife's name Eve; because she was the mother of all living.",
            ),
        ],
    ),
    (
        "noah",
        &[
            ("Genesis 6:9", "Noah was a just man and perfect in his generations..."),
            ("Genesis 7:1", "Come thou and all thy house into the ark..."),
        ],
    ),
    (
        "abraham",
        &[
            (
                "Genesis 12:1",
                "Now the LORD had said unto Abram, Get thee out of thy country...",
            ),
            (
                "Genesis 22:2",
                "Take now thy son, thine only son Isaac, whom thou lovest...",
            ),
        ],
    ),
];

/// Labels used when deriving display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionConfig {
    /// `title` when no occupation is recorded.
    pub default_title: String,
    /// Leading words of every description.
    pub description_prefix: String,
    /// Placeholder for missing dates and ages.
    pub unknown_label: String,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            default_title: "Biblical Figure".to_string(),
            description_prefix: "Biblical figure".to_string(),
            unknown_label: "Unknown".to_string(),
        }
    }
}

/// Projects every individual accepted by `filter`.
pub fn build_family_tree_data(
    document: &GedcomDocument,
    config: &ProjectionConfig,
    filter: &dyn PersonFilter,
) -> FamilyTreeData {
    document
        .individuals
        .iter()
        .filter(|(_, individual)| filter.accepts(individual))
        .map(|(id, individual)| (id.clone(), resolve_person(document, individual, config)))
        .collect()
}

/// Builds the resolved record for one individual.
pub fn resolve_person(
    document: &GedcomDocument,
    individual: &Individual,
    config: &ProjectionConfig,
) -> ResolvedPerson {
    let age_at_death = age_at_death(individual.birth_date(), individual.death_date())
        .map(|age| format!("{age} years"))
        .unwrap_or_else(|| config.unknown_label.clone());

    ResolvedPerson {
        name: or_label(&individual.name, &config.unknown_label),
        title: or_label(&individual.occupation, &config.default_title),
        description: build_description(individual, config),
        children: individual.children.clone().unwrap_or_default(),
        parents: individual.parents.clone().unwrap_or_default(),
        spouse: individual.spouse.clone(),
        birth_year: or_label(individual.birth_date(), &config.unknown_label),
        death_year: or_label(individual.death_date(), &config.unknown_label),
        age_at_death,
        verses: verses_for(&individual.name),
        given_name: individual.given_name.clone(),
        surname: individual.surname.clone(),
        sex: individual.sex,
        birth_place: individual.birth_place().to_string(),
        death_place: individual.death_place().to_string(),
        events: individual.events.clone(),
        notes: document.resolve_notes(&individual.notes),
    }
}

/// Extracts a 3-4 digit year from free-form date text.
///
/// `"ABT 1400 BC"` and `"1400"` both yield `1400`; `"Unknown"` yields `None`.
pub fn extract_year(date: &str) -> Option<u32> {
    let date = date.trim();
    if date.is_empty() || date == "Unknown" {
        return None;
    }
    YEAR_RE.find(date)?.as_str().parse().ok()
}

/// Year on a signed axis: `BC`/`B.C.`/`BCE` dates are negative.
pub fn signed_year(date: &str) -> Option<i64> {
    let year = i64::from(extract_year(date)?);
    if is_before_common_era(date) {
        Some(-year)
    } else {
        Some(year)
    }
}

/// Years between birth and death dates, when both are known and positive.
pub fn age_at_death(birth_date: &str, death_date: &str) -> Option<i64> {
    let age = signed_year(death_date)? - signed_year(birth_date)?;
    (age > 0).then_some(age)
}

fn is_before_common_era(date: &str) -> bool {
    date.to_ascii_uppercase()
        .replace('.', "")
        .split_whitespace()
        .any(is_era_token)
}

/// `BC`/`BCE`, alone or glued to the year digits (`2948BC`).
fn is_era_token(token: &str) -> bool {
    let Some(prefix) = token
        .strip_suffix("BCE")
        .or_else(|| token.strip_suffix("BC"))
    else {
        return false;
    };
    prefix.chars().all(|c| c.is_ascii_digit())
}

/// `"<prefix>[, <occupation>][ from <birthplace>]."`
pub fn build_description(individual: &Individual, config: &ProjectionConfig) -> String {
    let mut description = config.description_prefix.clone();
    if !individual.occupation.is_empty() {
        description.push_str(", ");
        description.push_str(&individual.occupation.to_lowercase());
    }
    let birth_place = individual.birth_place();
    if !birth_place.is_empty() {
        description.push_str(" from ");
        description.push_str(birth_place);
    }
    description.push('.');
    description
}

/// Scripture references for a name; unknown names yield an empty list.
pub fn verses_for(name: &str) -> Vec<VerseRef> {
    let key = name.trim().to_lowercase();
    VERSE_TABLE
        .iter()
        .find(|(table_name, _)| *table_name == key)
        .map(|(_, verses)| {
            verses
                .iter()
                .map(|(reference, text)| VerseRef {
                    reference: reference.to_string(),
                    text: text.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn or_label(value: &str, label: &str) -> String {
    if value.is_empty() {
        label.to_string()
    } else {
        value.to_string()
    }
}
