//! Structured export envelope for journal entries.
//!
//! Downstream exporters (PDF, Markdown) render from the same entry list; this
//! module only owns the JSON envelope, which must round-trip every entry
//! field exactly.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::JournalEntry;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalExport {
    pub exported_at: String,
    pub total: usize,
    pub entries: Vec<JournalEntry>,
}

impl JournalExport {
    pub fn from_entries(entries: Vec<JournalEntry>, exported_at: DateTime<Utc>) -> Self {
        Self {
            exported_at: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            total: entries.len(),
            entries,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Suggested download file name, e.g. `MindMend-2024-06-03.json`.
    pub fn file_name(&self) -> String {
        let day = self.exported_at.get(..10).unwrap_or("export");
        format!("MindMend-{day}.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::MoodCategory;
    use chrono::TimeZone;

    #[test]
    fn envelope_counts_entries_and_stamps_time() {
        let at = Utc.with_ymd_and_hms(2024, 6, 3, 9, 30, 0).unwrap();
        let export = JournalExport::from_entries(
            vec![JournalEntry::new("a", Some(MoodCategory::Calm), at)],
            at,
        );
        assert_eq!(export.total, 1);
        assert_eq!(export.exported_at, "2024-06-03T09:30:00.000Z");
        assert_eq!(export.file_name(), "MindMend-2024-06-03.json");
    }
}
