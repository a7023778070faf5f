//! Resolved person record consumed by family-tree views.
//!
//! Field names on the wire follow the tree viewers' expectations
//! (`birth_year`, `givenName`, `birthPlace`, ...), hence the mixed casing.

use crate::model::individual::{Event, Sex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Person id to resolved record, ordered by id.
pub type FamilyTreeData = BTreeMap<String, ResolvedPerson>;

/// One scripture reference attached to a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRef {
    pub reference: String,
    pub text: String,
}

/// Flattened person shape for radial/force/timeline/pedigree/card layouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPerson {
    pub name: String,
    pub title: String,
    pub description: String,
    pub children: Vec<String>,
    pub parents: Vec<String>,
    pub spouse: Option<String>,
    /// Raw birth date text, or the unknown label.
    pub birth_year: String,
    /// Raw death date text, or the unknown label.
    pub death_year: String,
    pub age_at_death: String,
    pub verses: Vec<VerseRef>,
    #[serde(rename = "givenName")]
    pub given_name: String,
    pub surname: String,
    pub sex: Sex,
    #[serde(rename = "birthPlace")]
    pub birth_place: String,
    #[serde(rename = "deathPlace")]
    pub death_place: String,
    pub events: Vec<Event>,
    pub notes: Vec<String>,
}
