//! # MindMend Core Library
//!
//! Journaling streak and mood analytics for the MindMend journal. The hosted
//! entry store, authentication and all rendering live elsewhere; this crate
//! turns an entry snapshot into a render payload.
//!
//! ## Architecture
//!
//! - **Calendar**: UTC calendar-day bucketing shared by every component
//! - **Streaks**: consecutive-day streak ending today, plus display tiers
//! - **Insights**: trailing-window mood distribution, dominant mood and a
//!   daily trend series
//! - **Notification gate**: once-per-day badge decision with milestone
//!   detection, persisted through an injected key-value store
//!
//! ## Key Components
//!
//! - [`AnalyticsEngine`]: one evaluation from snapshot to [`RenderPayload`]
//! - [`EntryStore`]: where entries come from
//! - [`KeyValueStore`]: where badge state lives
//! - [`Config`]: application configuration management

pub mod calendar;
pub mod engine;
pub mod entry;
pub mod error;
pub mod export;
pub mod insights;
pub mod logging;
pub mod mood;
pub mod notification;
pub mod storage;
pub mod streak;

pub use calendar::{CalendarDay, DayClock};
pub use engine::{AnalyticsEngine, RenderPayload};
pub use entry::{EntryStore, JournalEntry, JsonFileEntryStore};
pub use error::{ConfigError, CoreError, StoreError};
pub use export::JournalExport;
pub use insights::{MoodAggregator, MoodCount, MoodInsights};
pub use mood::MoodCategory;
pub use notification::{NotificationDecision, NotificationGate, NotificationState};
pub use storage::{Config, KeyValueStore, MemoryKvStore, SqliteKvStore};
pub use streak::{StreakCalculator, StreakTier};
