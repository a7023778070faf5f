//! Core GEDCOM parsing and family-tree logic for gedtree.
//! Text in, resolved person records out; no I/O beyond optional file loading.

pub mod classify;
pub mod logging;
pub mod model;
pub mod parse;
pub mod search;
pub mod service;

pub use classify::{guess_gender, is_biblical_name, AcceptAll, BiblicalNameFilter, Gender, PersonFilter};
pub use logging::{init_logging, logging_status, LogLevel, LoggingError};
pub use model::document::GedcomDocument;
pub use model::family::{Family, Source};
pub use model::individual::{Event, EventKind, Individual, Sex};
pub use model::person::{FamilyTreeData, ResolvedPerson, VerseRef};
pub use parse::{GedcomParser, LoadError};
pub use search::index::{
    hits_to_csv, SearchError, SearchField, SearchHit, SearchIndex, SearchQuery, SearchResult,
};
pub use service::analytics::{analyze, FamilyAnalytics};
pub use service::diagnostics::{Statistics, ValidationReport};
pub use service::projection::{extract_year, ProjectionConfig};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
