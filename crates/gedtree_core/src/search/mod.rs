//! In-memory person search.
//!
//! # Responsibility
//! - Index resolved person records by lower-cased text fields.
//! - Return scored, deterministically ordered hits.
//!
//! # Invariants
//! - Scores add up per query term: exact name 10, name substring 5, other
//!   fields 1 each. Several weak field matches can outrank one name match.
//! - Hits with zero score are never returned.

pub mod index;
