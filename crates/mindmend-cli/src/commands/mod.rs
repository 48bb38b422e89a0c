pub mod badge;
pub mod config;
pub mod export;
pub mod insights;
pub mod streak;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;
use mindmend_core::{CalendarDay, DayClock};

/// Options shared by every command that reads entries.
#[derive(Args, Debug)]
pub struct EntrySource {
    /// JSON file with entries (export envelope or bare array)
    #[arg(long, short = 'e')]
    pub entries: PathBuf,
    /// Reference instant (RFC 3339) instead of the system clock
    #[arg(long, conflicts_with = "today")]
    pub now: Option<DateTime<Utc>>,
    /// Reference day (YYYY-MM-DD), evaluated at noon UTC
    #[arg(long)]
    pub today: Option<CalendarDay>,
}

impl EntrySource {
    pub fn clock(&self) -> DayClock {
        match (self.now, self.today) {
            (Some(now), _) => DayClock::at(now),
            (None, Some(day)) => DayClock::on_day(day),
            (None, None) => DayClock::system(),
        }
    }
}

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;
