//! Individual (`INDI`) record model.
//!
//! # Responsibility
//! - Hold the facts parsed from one `INDI` record.
//! - Serve birth/death details from the event list through accessors.
//!
//! # Invariants
//! - `events` is the only storage for dated facts; flat birth/death fields are
//!   derived, never written.
//! - `parents`, `children` and `spouse` are `None` until relationships are built.

use serde::{Deserialize, Serialize};

/// Recorded sex of an individual.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    /// Male.
    M,
    /// Female.
    F,
    /// Unknown or not recorded.
    #[default]
    U,
}

impl Sex {
    /// Parses a `SEX` value; anything other than `M`/`F` maps to `U`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "M" => Self::M,
            "F" => Self::F,
            _ => Self::U,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::M => "M",
            Self::F => "F",
            Self::U => "U",
        }
    }
}

/// Kind of a dated life or family event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Birth,
    Death,
    Burial,
    Christening,
    Residence,
    Marriage,
    Divorce,
}

impl EventKind {
    /// Maps a level-1 GEDCOM event tag to its kind.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "BIRT" => Some(Self::Birth),
            "DEAT" => Some(Self::Death),
            "BURI" => Some(Self::Burial),
            "CHR" => Some(Self::Christening),
            "RESI" => Some(Self::Residence),
            "MARR" => Some(Self::Marriage),
            "DIV" => Some(Self::Divorce),
            _ => None,
        }
    }
}

/// One dated event with optional place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Serialized as `type` to match the tree viewer's event shape.
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub date: String,
    pub place: String,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            date: String::new(),
            place: String::new(),
        }
    }
}

/// Returns the last non-empty value of `field` among events of `kind`.
///
/// A later event without a date does not hide an earlier dated one.
pub(crate) fn latest_event_field<'a>(
    events: &'a [Event],
    kind: EventKind,
    field: fn(&Event) -> &str,
) -> &'a str {
    events
        .iter()
        .rev()
        .filter(|event| event.kind == kind)
        .map(field)
        .find(|value| !value.is_empty())
        .unwrap_or("")
}

/// Parsed `INDI` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    pub id: String,
    /// Display name derived from `NAME` and its `GIVN`/`SURN` parts.
    pub name: String,
    pub given_name: String,
    pub surname: String,
    pub sex: Sex,
    pub occupation: String,
    /// Note record ids or inline note text, in source order.
    pub notes: Vec<String>,
    /// `FAMS` family ids.
    pub spouse_families: Vec<String>,
    /// `FAMC` family ids.
    pub child_families: Vec<String>,
    pub events: Vec<Event>,
    pub parents: Option<Vec<String>>,
    pub children: Option<Vec<String>>,
    /// Name of the spouse from the last family processed.
    pub spouse: Option<String>,
    /// Ids of every spouse seen across families.
    pub spouse_ids: Vec<String>,
}

impl Individual {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            given_name: String::new(),
            surname: String::new(),
            sex: Sex::U,
            occupation: String::new(),
            notes: Vec::new(),
            spouse_families: Vec::new(),
            child_families: Vec::new(),
            events: Vec::new(),
            parents: None,
            children: None,
            spouse: None,
            spouse_ids: Vec::new(),
        }
    }

    pub fn birth_date(&self) -> &str {
        latest_event_field(&self.events, EventKind::Birth, |event| &event.date)
    }

    pub fn birth_place(&self) -> &str {
        latest_event_field(&self.events, EventKind::Birth, |event| &event.place)
    }

    pub fn death_date(&self) -> &str {
        latest_event_field(&self.events, EventKind::Death, |event| &event.date)
    }

    pub fn death_place(&self) -> &str {
        latest_event_field(&self.events, EventKind::Death, |event| &event.place)
    }

    /// Returns whether no parent link was derived for this individual.
    pub fn is_root(&self) -> bool {
        self.parents.as_ref().map_or(true, Vec::is_empty)
    }
}
