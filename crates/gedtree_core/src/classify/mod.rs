//! Person classification strategies.
//!
//! # Responsibility
//! - Decide which parsed individuals are emitted (`PersonFilter`).
//! - Guess gender for records without a usable `SEX` value.
//!
//! # Invariants
//! - Classifiers are pure: same input, same verdict.
//! - Heuristics here are approximate; callers must not treat a verdict as
//!   authoritative.

mod biblical;

pub use biblical::{is_biblical_name, BiblicalNameFilter};

use crate::model::individual::{Individual, Sex};
use crate::model::person::ResolvedPerson;
use serde::{Deserialize, Serialize};

/// Filter strategy applied to each individual before projection.
pub trait PersonFilter {
    /// Stable identifier used in logs.
    fn id(&self) -> &'static str;
    /// Returns whether `individual` should be emitted.
    fn accepts(&self, individual: &Individual) -> bool;
}

/// Emits every individual.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl PersonFilter for AcceptAll {
    fn id(&self) -> &'static str {
        "accept_all"
    }

    fn accepts(&self, _individual: &Individual) -> bool {
        true
    }
}

/// Gender used by search filters and analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parses `male`/`female` (also `m`/`f`), case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Some(Self::Male),
            "female" | "f" => Some(Self::Female),
            _ => None,
        }
    }
}

const FEMALE_NAMES: &[&str] = &[
    "eve", "sarah", "sarai", "rebekah", "rebecca", "rachel", "leah", "dinah", "tamar", "miriam",
    "deborah", "ruth", "naomi", "bathsheba", "abigail", "esther", "mary", "elizabeth", "anna",
    "hannah", "martha",
];

const FEMALE_CUES: &[&str] = &["wife", "mother"];

/// Guesses gender from `sex`, falling back to name and title/description cues.
///
/// Unknown sex with no female cue counts as male, as biblical genealogies
/// mostly trace male lines.
pub fn guess_gender(person: &ResolvedPerson) -> Gender {
    match person.sex {
        Sex::M => return Gender::Male,
        Sex::F => return Gender::Female,
        Sex::U => {}
    }

    let name = person.name.to_lowercase();
    if FEMALE_NAMES.iter().any(|female| name.contains(female)) {
        return Gender::Female;
    }

    let title = person.title.to_lowercase();
    let description = person.description.to_lowercase();
    if FEMALE_CUES
        .iter()
        .any(|cue| title.contains(cue) || description.contains(cue))
    {
        return Gender::Female;
    }

    Gender::Male
}
