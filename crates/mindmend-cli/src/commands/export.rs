use std::path::PathBuf;

use chrono::Utc;
use clap::Args;
use mindmend_core::{EntryStore, JournalExport, JsonFileEntryStore};

use super::CmdResult;

#[derive(Args)]
pub struct ExportArgs {
    /// JSON file with entries (export envelope or bare array)
    #[arg(long, short = 'e')]
    entries: PathBuf,
    /// Write to this file instead of stdout
    #[arg(long, short = 'o', conflicts_with = "save")]
    output: Option<PathBuf>,
    /// Write to `MindMend-<date>.json` in the current directory
    #[arg(long)]
    save: bool,
}

pub fn run(args: ExportArgs) -> CmdResult {
    let entries = JsonFileEntryStore::new(&args.entries).fetch_entries()?;
    if entries.is_empty() {
        eprintln!("No entries.");
    }
    let export = JournalExport::from_entries(entries, Utc::now());
    let json = export.to_json_pretty()?;

    let output = match args.output {
        Some(path) => Some(path),
        None if args.save => Some(PathBuf::from(export.file_name())),
        None => None,
    };
    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            eprintln!("exported {} entries to {}", export.total, path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
