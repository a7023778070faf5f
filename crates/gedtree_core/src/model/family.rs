//! Family (`FAM`) and source (`SOUR`) record models.

use crate::model::individual::{latest_event_field, Event, EventKind};

/// Parsed `FAM` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Family {
    pub id: String,
    pub husband: Option<String>,
    pub wife: Option<String>,
    /// Child ids in `CHIL` order, which is birth order by convention.
    pub children: Vec<String>,
    /// Marriage and divorce events.
    pub events: Vec<Event>,
    pub notes: Vec<String>,
}

impl Family {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            husband: None,
            wife: None,
            children: Vec::new(),
            events: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn marriage_date(&self) -> &str {
        latest_event_field(&self.events, EventKind::Marriage, |event| &event.date)
    }

    pub fn marriage_place(&self) -> &str {
        latest_event_field(&self.events, EventKind::Marriage, |event| &event.place)
    }

    pub fn divorce_date(&self) -> &str {
        latest_event_field(&self.events, EventKind::Divorce, |event| &event.date)
    }
}

/// Parsed `SOUR` record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Source {
    pub id: String,
    pub title: String,
    pub author: String,
    pub publication: String,
}

impl Source {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}
