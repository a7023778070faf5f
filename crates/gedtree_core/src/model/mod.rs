//! Genealogy domain model.
//!
//! # Responsibility
//! - Define the records produced by the GEDCOM parser.
//! - Define the resolved person shape consumed by tree visualisations.
//!
//! # Invariants
//! - Records are keyed by their GEDCOM cross-reference id, stripped of `@`.
//! - Relationship fields on `Individual` stay unset until relationships are built.

pub mod document;
pub mod family;
pub mod individual;
pub mod person;
