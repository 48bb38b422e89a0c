//! Journal entries and the stores that supply them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

use crate::calendar::{self, CalendarDay};
use crate::error::{Result, StoreError};
use crate::mood::{self, MoodCategory};

/// Read-only projection of one journal entry.
///
/// `created_at` is kept exactly as the store returned it so that a snapshot
/// can be exported and re-read without drift. Use [`JournalEntry::created_instant`]
/// to get the parsed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
    #[serde(default, deserialize_with = "mood::deserialize_feeling")]
    pub feeling: Option<MoodCategory>,
    pub created_at: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl JournalEntry {
    pub fn new(
        id: impl Into<String>,
        feeling: Option<MoodCategory>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            body: String::new(),
            feeling,
            created_at: created_at.to_rfc3339(),
        }
    }

    pub fn with_text(mut self, title: impl Into<String>, body: impl Into<String>) -> Self {
        self.title = title.into();
        self.body = body.into();
        self
    }

    /// Parsed `created_at`, or `None` if the stored value is malformed.
    pub fn created_instant(&self) -> Option<DateTime<Utc>> {
        calendar::parse_timestamp(&self.created_at)
    }

    pub fn day(&self) -> Option<CalendarDay> {
        self.created_instant().map(calendar::normalize)
    }
}

/// Pair every entry with its parsed instant, dropping malformed ones.
pub(crate) fn timestamped(entries: &[JournalEntry]) -> Vec<(DateTime<Utc>, &JournalEntry)> {
    let mut out = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry.created_instant() {
            Some(ts) => out.push((ts, entry)),
            None => tracing::warn!(
                entry_id = %entry.id,
                created_at = %entry.created_at,
                "dropping entry with unparseable timestamp"
            ),
        }
    }
    out
}

/// Supplies a snapshot of a user's entries, newest first.
///
/// Implementations own retries and timeouts; the engine calls this once per
/// evaluation and substitutes an empty snapshot on error.
pub trait EntryStore {
    fn fetch_entries(&self) -> Result<Vec<JournalEntry>>;
}

impl EntryStore for Vec<JournalEntry> {
    fn fetch_entries(&self) -> Result<Vec<JournalEntry>> {
        Ok(self.clone())
    }
}

impl EntryStore for [JournalEntry] {
    fn fetch_entries(&self) -> Result<Vec<JournalEntry>> {
        Ok(self.to_vec())
    }
}

/// Entries read from a JSON file on disk.
///
/// Accepts either an export envelope (`{"exported_at", "total", "entries"}`)
/// or a bare array of entries.
#[derive(Debug, Clone)]
pub struct JsonFileEntryStore {
    path: PathBuf,
}

impl JsonFileEntryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EntryStore for JsonFileEntryStore {
    fn fetch_entries(&self) -> Result<Vec<JournalEntry>> {
        let fetch_failed = |e: &dyn std::fmt::Display| {
            StoreError::FetchFailed(format!("{}: {e}", self.path.display()))
        };

        let content = std::fs::read_to_string(&self.path).map_err(|e| fetch_failed(&e))?;
        let root: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| fetch_failed(&e))?;
        let records = match root {
            serde_json::Value::Array(records) => records,
            serde_json::Value::Object(mut envelope) => match envelope.remove("entries") {
                Some(serde_json::Value::Array(records)) => records,
                _ => return Err(fetch_failed(&"envelope has no `entries` array").into()),
            },
            _ => return Err(fetch_failed(&"expected an array or an export envelope").into()),
        };

        let mut entries = parse_records(records);
        // Newest first; malformed timestamps sort last.
        entries.sort_by(|a, b| b.created_instant().cmp(&a.created_instant()));
        Ok(entries)
    }
}

/// Deserialize records one by one, dropping the ones that do not fit.
fn parse_records(records: Vec<serde_json::Value>) -> Vec<JournalEntry> {
    let mut entries = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<JournalEntry>(record) {
            Ok(entry) => entries.push(entry),
            Err(e) => tracing::warn!(index, "dropping unreadable entry record: {e}"),
        }
    }
    entries
}
