//! GEDCOM parsing entry points.
//!
//! # Responsibility
//! - Dispatch level-0 records to the record sub-parsers.
//! - Own parse state and rebuild it from scratch on every call.
//! - Produce the resolved family-tree projection after relationships are built.
//!
//! # Invariants
//! - Parsing never fails: malformed lines, unknown records and dangling
//!   references degrade to skipped data.
//! - Two parses of the same text produce identical output.

pub mod line;
pub mod reader;
pub mod records;

use crate::classify::{AcceptAll, PersonFilter};
use crate::model::document::GedcomDocument;
use crate::model::individual::Individual;
use crate::model::person::FamilyTreeData;
use crate::parse::line::{preprocess_lines, LineRecord};
use crate::parse::reader::LineReader;
use crate::service::diagnostics::{self, Statistics, ValidationReport};
use crate::service::projection::{build_family_tree_data, ProjectionConfig};
use crate::service::relationships::build_relationships;
use log::{debug, info, trace};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const UTF8_BOM: char = '\u{feff}';

/// Error raised when GEDCOM text cannot be loaded from disk.
#[derive(Debug)]
pub enum LoadError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    InvalidUtf8 {
        path: PathBuf,
    },
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read GEDCOM file `{}`: {source}", path.display())
            }
            Self::InvalidUtf8 { path } => {
                write!(f, "GEDCOM file `{}` is not valid UTF-8", path.display())
            }
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidUtf8 { .. } => None,
        }
    }
}

/// Walks `lines` and collects every supported record.
///
/// Relationships are not built here; see
/// [`build_relationships`](crate::service::relationships::build_relationships).
pub fn parse_document(lines: &[LineRecord]) -> GedcomDocument {
    let mut document = GedcomDocument::new();
    let mut reader = LineReader::new(lines);

    while let Some(line) = reader.advance() {
        if line.level != 0 {
            continue;
        }

        let (kind, rest) = match line.value.split_once(char::is_whitespace) {
            Some((kind, rest)) => (kind, rest.trim()),
            None => (line.value.as_str(), ""),
        };
        let id = line.tag.as_str();

        match kind {
            "INDI" => document.insert_individual(records::parse_individual(&mut reader, id)),
            "FAM" => document.insert_family(records::parse_family(&mut reader, id)),
            "NOTE" => {
                let text = records::parse_note(&mut reader, rest);
                document.insert_note(id, text);
            }
            "SOUR" => document.insert_source(records::parse_source(&mut reader, id)),
            _ => {
                let skipped = reader.skip_subtree(0);
                trace!(
                    "event=record_skipped module=parse tag={} line={} skipped_lines={}",
                    line.tag,
                    line.line_number,
                    skipped
                );
            }
        }
    }

    document
}

/// Stateful GEDCOM parser with a pluggable person filter.
pub struct GedcomParser {
    config: ProjectionConfig,
    filter: Box<dyn PersonFilter>,
    lines: Vec<LineRecord>,
    document: GedcomDocument,
}

impl Default for GedcomParser {
    fn default() -> Self {
        Self::new()
    }
}

impl GedcomParser {
    /// Creates a parser that emits every individual.
    pub fn new() -> Self {
        Self {
            config: ProjectionConfig::default(),
            filter: Box::new(AcceptAll),
            lines: Vec::new(),
            document: GedcomDocument::new(),
        }
    }

    /// Replaces the filter deciding which individuals are emitted.
    pub fn with_filter(mut self, filter: Box<dyn PersonFilter>) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_config(mut self, config: ProjectionConfig) -> Self {
        self.config = config;
        self
    }

    /// Parses GEDCOM text and returns the resolved family-tree data.
    ///
    /// Previous parse state is discarded first.
    pub fn parse(&mut self, content: &str) -> FamilyTreeData {
        self.document.clear();
        let preprocessed = preprocess_lines(content);
        self.lines = preprocessed.lines;

        self.document = parse_document(&self.lines);
        build_relationships(&mut self.document);

        let data = build_family_tree_data(&self.document, &self.config, self.filter.as_ref());
        debug!(
            "event=gedcom_parse module=parse status=ok lines={} dropped_lines={} individuals={} families={} notes={} sources={} emitted={} filter={}",
            self.lines.len(),
            preprocessed.dropped,
            self.document.individuals.len(),
            self.document.families.len(),
            self.document.notes.len(),
            self.document.sources.len(),
            data.len(),
            self.filter.id()
        );
        data
    }

    /// Reads a UTF-8 GEDCOM file (optional BOM) and parses it.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<FamilyTreeData, LoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|_| LoadError::InvalidUtf8 {
            path: path.to_path_buf(),
        })?;

        info!(
            "event=gedcom_load module=parse status=ok path={} bytes={}",
            path.display(),
            text.len()
        );
        Ok(self.parse(text.trim_start_matches(UTF8_BOM)))
    }

    /// Records collected by the last parse, with relationships built.
    pub fn document(&self) -> &GedcomDocument {
        &self.document
    }

    /// Line records kept from the last parse.
    pub fn lines(&self) -> &[LineRecord] {
        &self.lines
    }

    pub fn statistics(&self) -> Statistics {
        diagnostics::statistics(&self.document)
    }

    pub fn find_roots(&self) -> Vec<&Individual> {
        diagnostics::find_roots(&self.document)
    }

    pub fn validate(&self) -> ValidationReport {
        diagnostics::validate(&self.document)
    }
}
