//! Scored substring search over resolved person records.
//!
//! # Responsibility
//! - Build a lower-cased index of searchable person fields.
//! - Score whitespace-separated query terms per field.
//!
//! # Invariants
//! - Per term and field: exact name match scores 10, name substring 5, any
//!   other field substring 1.
//! - Ordering is score descending, then person id ascending.

use crate::classify::{guess_gender, Gender};
use crate::model::person::{FamilyTreeData, VerseRef};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const SNIPPET_CHARS: usize = 100;
const EMPTY_SNIPPET: &str = "Biblical figure in genealogy";
const DEFAULT_LIMIT: u32 = 20;

/// Result type for search APIs.
pub type SearchResult<T> = Result<T, SearchError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Field name not in `name|title|description|verses`.
    UnknownField(String),
    /// Query selects no field to search.
    NoFields,
    /// CSV writer failure.
    Csv(String),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownField(value) => write!(
                f,
                "unknown search field `{value}`; expected name|title|description|verses"
            ),
            Self::NoFields => write!(f, "search query must select at least one field"),
            Self::Csv(message) => write!(f, "failed to write search CSV: {message}"),
        }
    }
}

impl Error for SearchError {}

/// Searchable person field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Name,
    Title,
    Description,
    Verses,
}

impl SearchField {
    pub const ALL: [SearchField; 4] = [
        SearchField::Name,
        SearchField::Title,
        SearchField::Description,
        SearchField::Verses,
    ];

    pub fn parse(value: &str) -> SearchResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "verses" => Ok(Self::Verses),
            other => Err(SearchError::UnknownField(other.to_string())),
        }
    }
}

/// Search options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub fields: Vec<SearchField>,
    /// `None` matches any gender.
    pub gender: Option<Gender>,
    pub limit: u32,
}

impl SearchQuery {
    /// Creates a query over all fields, any gender, default limit.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fields: SearchField::ALL.to_vec(),
            gender: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// One scored search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    #[serde(rename = "id")]
    pub person_id: String,
    pub name: String,
    pub score: u32,
    pub snippet: String,
}

#[derive(Debug, Clone)]
struct IndexEntry {
    id: String,
    display_name: String,
    name: String,
    title: String,
    description: String,
    verses: String,
    gender: Gender,
    snippet: String,
}

impl IndexEntry {
    fn field(&self, field: SearchField) -> &str {
        match field {
            SearchField::Name => &self.name,
            SearchField::Title => &self.title,
            SearchField::Description => &self.description,
            SearchField::Verses => &self.verses,
        }
    }

    fn score(&self, terms: &[String], fields: &[SearchField]) -> u32 {
        let mut score = 0;
        for term in terms {
            for &field in fields {
                let value = self.field(field);
                if !value.contains(term.as_str()) {
                    continue;
                }
                score += match field {
                    SearchField::Name if value == term.as_str() => 10,
                    SearchField::Name => 5,
                    _ => 1,
                };
            }
        }
        score
    }
}

/// Search index built from one family-tree projection.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
}

impl SearchIndex {
    pub fn build(data: &FamilyTreeData) -> Self {
        let entries = data
            .iter()
            .map(|(id, person)| IndexEntry {
                id: id.clone(),
                display_name: person.name.clone(),
                name: person.name.to_lowercase(),
                title: person.title.to_lowercase(),
                description: person.description.to_lowercase(),
                verses: verse_text(&person.verses).to_lowercase(),
                gender: guess_gender(person),
                snippet: snippet(&person.description),
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs `query` and returns ranked hits.
    ///
    /// Returns an empty list for blank queries or a zero limit.
    pub fn search(&self, query: &SearchQuery) -> SearchResult<Vec<SearchHit>> {
        if query.fields.is_empty() {
            return Err(SearchError::NoFields);
        }
        let terms: Vec<String> = query
            .text
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if terms.is_empty() || query.limit == 0 {
            return Ok(Vec::new());
        }

        let mut hits: Vec<SearchHit> = self
            .entries
            .iter()
            .filter(|entry| query.gender.map_or(true, |gender| entry.gender == gender))
            .filter_map(|entry| {
                let score = entry.score(&terms, &query.fields);
                (score > 0).then(|| SearchHit {
                    person_id: entry.id.clone(),
                    name: entry.display_name.clone(),
                    score,
                    snippet: entry.snippet.clone(),
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.person_id.cmp(&b.person_id))
        });
        hits.truncate(query.limit as usize);
        Ok(hits)
    }
}

const CSV_HEADER: [&str; 5] = ["Name", "Title", "Description", "Birth Year", "Death Year"];

/// Renders hits as CSV with every field quoted: `Name,Title,Description,Birth Year,Death Year`.
///
/// Hits whose id is missing from `data` are skipped.
pub fn hits_to_csv(hits: &[SearchHit], data: &FamilyTreeData) -> SearchResult<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER).map_err(csv_error)?;
    for person in hits.iter().filter_map(|hit| data.get(&hit.person_id)) {
        writer
            .write_record([
                person.name.as_str(),
                person.title.as_str(),
                person.description.as_str(),
                person.birth_year.as_str(),
                person.death_year.as_str(),
            ])
            .map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| SearchError::Csv(err.to_string()))?;
    let mut text = String::from_utf8(bytes).map_err(|err| SearchError::Csv(err.to_string()))?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

fn csv_error(err: csv::Error) -> SearchError {
    SearchError::Csv(err.to_string())
}

fn verse_text(verses: &[VerseRef]) -> String {
    verses
        .iter()
        .map(|verse| verse.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn snippet(description: &str) -> String {
    if description.is_empty() {
        return EMPTY_SNIPPET.to_string();
    }
    if description.chars().count() > SNIPPET_CHARS {
        let mut truncated: String = description.chars().take(SNIPPET_CHARS).collect();
        truncated.push_str("...");
        return truncated;
    }
    description.to_string()
}
