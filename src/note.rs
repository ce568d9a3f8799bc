//! Core data structures for the secnotes application.
//!
//! A workspace is a list of [`Section`]s, each owning its [`Note`]s. Both
//! entity kinds draw their ids from the same counter.
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// A single categorized note inside a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier, shared id space with sections
    pub id: u64,
    /// Free-text category label used for grouping
    pub category: String,
    /// Note body
    pub content: String,
    /// When the note was created
    #[serde(with = "iso_millis")]
    pub date: DateTime<Utc>,
}

impl Note {
    /// Creates a note, truncating the timestamp to the precision it is
    /// exported with.
    pub fn new(id: u64, category: String, content: String, date: DateTime<Utc>) -> Self {
        Note {
            id,
            category,
            content,
            date: date.trunc_subsecs(3),
        }
    }
}

/// A named container of notes, newest note first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Unique identifier, shared id space with notes
    pub id: u64,
    /// Display name, not required to be unique
    pub name: String,
    /// Notes in insertion order, newest first
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl Section {
    /// Creates an empty section
    pub fn new(id: u64, name: String) -> Self {
        Section {
            id,
            name,
            notes: Vec::new(),
        }
    }
}

/// ISO-8601 text with millisecond precision and a `Z` suffix.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&text)
            .map(|d| d.with_timezone(&Utc))
            .map_err(|e| D::Error::custom(format!("invalid date '{}': {}", text, e)))
    }
}
