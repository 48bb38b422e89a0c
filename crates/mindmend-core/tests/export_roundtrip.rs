//! Export envelope contract: entries survive export and re-import exactly.

use chrono::{TimeZone, Utc};
use mindmend_core::{EntryStore, JournalEntry, JournalExport, JsonFileEntryStore, MoodCategory};

fn sample_entries() -> Vec<JournalEntry> {
    vec![
        JournalEntry {
            id: "8d0f7c7e-5b7e-4f0e-9a57-2f6b1f0c9e11".into(),
            title: "Morning pages".into(),
            body: "<p>Slept well.</p>\nCoffee, then a walk.".into(),
            feeling: Some(MoodCategory::Happy),
            created_at: "2024-06-03T07:12:45.123456+00:00".into(),
        },
        JournalEntry {
            id: "1c2d".into(),
            title: String::new(),
            body: "Untitled thoughts with \"quotes\" and émojis ✨".into(),
            feeling: None,
            created_at: "2024-06-02T22:01:00Z".into(),
        },
    ]
}

#[test]
fn test_export_roundtrip_preserves_fields() {
    let at = Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap();
    let export = JournalExport::from_entries(sample_entries(), at);
    let json = export.to_json_pretty().unwrap();
    let parsed = JournalExport::from_json(&json).unwrap();

    assert_eq!(parsed.total, 2);
    assert_eq!(parsed.entries, sample_entries());
    assert_eq!(parsed, export);
}

#[test]
fn test_exported_file_is_readable_as_entry_store() {
    let at = Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap();
    let export = JournalExport::from_entries(sample_entries(), at);
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), export.to_json_pretty().unwrap()).unwrap();

    let entries = JsonFileEntryStore::new(file.path()).fetch_entries().unwrap();
    assert_eq!(entries, sample_entries());
}
