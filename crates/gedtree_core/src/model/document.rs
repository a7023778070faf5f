//! Parsed GEDCOM document: every record of one parse call.
//!
//! # Invariants
//! - A record id appears at most once per record kind; a later record with the
//!   same id replaces the earlier one.
//! - `families` keeps document order, which decides spouse-name precedence.

use crate::model::family::{Family, Source};
use crate::model::individual::Individual;
use std::collections::BTreeMap;

/// All records collected from one GEDCOM text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GedcomDocument {
    pub individuals: BTreeMap<String, Individual>,
    pub families: Vec<Family>,
    pub notes: BTreeMap<String, String>,
    pub sources: BTreeMap<String, Source>,
}

impl GedcomDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every record.
    pub fn clear(&mut self) {
        self.individuals.clear();
        self.families.clear();
        self.notes.clear();
        self.sources.clear();
    }

    pub fn individual(&self, id: &str) -> Option<&Individual> {
        self.individuals.get(id)
    }

    pub fn insert_individual(&mut self, individual: Individual) {
        self.individuals.insert(individual.id.clone(), individual);
    }

    /// Inserts a family, replacing in place any family with the same id.
    pub fn insert_family(&mut self, family: Family) {
        match self.families.iter_mut().find(|existing| existing.id == family.id) {
            Some(existing) => *existing = family,
            None => self.families.push(family),
        }
    }

    pub fn insert_note(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.notes.insert(id.into(), text.into());
    }

    pub fn insert_source(&mut self, source: Source) {
        self.sources.insert(source.id.clone(), source);
    }

    /// Resolves note references: known note ids become their text, anything
    /// else is kept verbatim as inline note text.
    pub fn resolve_notes(&self, references: &[String]) -> Vec<String> {
        references
            .iter()
            .map(|reference| {
                self.notes
                    .get(reference)
                    .cloned()
                    .unwrap_or_else(|| reference.clone())
            })
            .collect()
    }
}
