//! Analytics engine: one evaluation from entry snapshot to render payload.
//!
//! Each call fetches a fresh snapshot, so re-running on page load, focus
//! regain or a timer is safe. The only state carried between calls is the
//! badge gate's persisted record.

use serde::{Deserialize, Serialize};

use crate::calendar::DayClock;
use crate::entry::{EntryStore, JournalEntry};
use crate::insights::{MoodAggregator, MoodCount, MoodInsights};
use crate::mood::MoodCategory;
use crate::notification::{NotificationDecision, NotificationGate};
use crate::storage::{Config, KeyValueStore};
use crate::streak::{StreakCalculator, StreakTier};

/// Everything a presentation layer needs to draw the badge and insights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPayload {
    pub streak: u32,
    pub tier: StreakTier,
    pub entry_count: u32,
    pub distribution: Vec<MoodCount>,
    pub dominant: Option<MoodCategory>,
    pub trend: Vec<Option<f64>>,
    pub should_show_badge: bool,
    pub is_new_milestone: bool,
}

#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    streaks: StreakCalculator,
    moods: MoodAggregator,
    notifications_enabled: bool,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self {
            streaks: StreakCalculator::new(),
            moods: MoodAggregator::new(),
            notifications_enabled: true,
        }
    }
}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            streaks: StreakCalculator::new(),
            moods: MoodAggregator::with_windows(
                config.insights.window_days,
                config.insights.trend_days,
            ),
            notifications_enabled: config.notifications.enabled,
        }
    }

    /// Fetch a snapshot, substituting an empty one if the store fails.
    pub fn snapshot<E: EntryStore + ?Sized>(&self, store: &E) -> Vec<JournalEntry> {
        match store.fetch_entries() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!("entry fetch failed, evaluating empty snapshot: {e}");
                Vec::new()
            }
        }
    }

    pub fn streak(&self, entries: &[JournalEntry], clock: &DayClock) -> u32 {
        self.streaks.current_streak(entries, clock)
    }

    pub fn insights(&self, entries: &[JournalEntry], clock: &DayClock) -> MoodInsights {
        self.moods.aggregate(entries, clock)
    }

    /// Run a full evaluation.
    ///
    /// The gate is consulted, and its state written, only for a non-zero
    /// streak; without a streak there is no badge to show.
    pub fn evaluate<E, S>(
        &self,
        store: &E,
        gate: &mut NotificationGate<S>,
        clock: &DayClock,
    ) -> RenderPayload
    where
        E: EntryStore + ?Sized,
        S: KeyValueStore,
    {
        let entries = self.snapshot(store);
        let streak = self.streak(&entries, clock);
        let insights = self.insights(&entries, clock);

        let decision = if streak > 0 && self.notifications_enabled {
            gate.evaluate(streak, clock.today())
        } else {
            NotificationDecision::default()
        };

        tracing::info!(
            streak,
            entries = entries.len(),
            show_badge = decision.should_show,
            milestone = decision.is_new_milestone,
            "evaluation complete"
        );

        RenderPayload {
            streak,
            tier: StreakTier::for_streak(streak),
            entry_count: insights.entry_count,
            distribution: insights.distribution,
            dominant: insights.dominant,
            trend: insights.trend,
            should_show_badge: decision.should_show,
            is_new_milestone: decision.is_new_milestone,
        }
    }
}
