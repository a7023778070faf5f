//! Post-parse services over a `GedcomDocument`.
//!
//! # Responsibility
//! - Derive parent/child/spouse links from family records.
//! - Project individuals into the resolved person shape.
//! - Provide diagnostics and analytics over parsed data.
//!
//! # Invariants
//! - Services never fail on dangling references; they skip them.

pub mod analytics;
pub mod diagnostics;
pub mod projection;
pub mod relationships;
