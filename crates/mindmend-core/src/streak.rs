//! Consecutive-day journaling streaks.
//!
//! A streak is the unbroken run of calendar days ending at today that each
//! hold at least one entry. Several entries on one day count once, and a
//! missing today means no streak at all, however long the run before it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::calendar::{CalendarDay, DayClock};
use crate::entry::{self, JournalEntry};

/// Display tier for a streak length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakTier {
    /// Fewer than 3 days
    Seedling,
    /// 3 to 6 days
    Sparkles,
    /// 7 to 13 days
    Fire,
    /// 14 to 29 days
    TwoWeekFire,
    /// 30 to 49 days
    Star,
    /// 50 to 99 days
    Trophy,
    /// 100 days and up
    Crown,
}

impl StreakTier {
    pub fn for_streak(streak: u32) -> Self {
        match streak {
            0..=2 => StreakTier::Seedling,
            3..=6 => StreakTier::Sparkles,
            7..=13 => StreakTier::Fire,
            14..=29 => StreakTier::TwoWeekFire,
            30..=49 => StreakTier::Star,
            50..=99 => StreakTier::Trophy,
            _ => StreakTier::Crown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StreakTier::Seedling => "Seedling",
            StreakTier::Sparkles => "Sparkles",
            StreakTier::Fire | StreakTier::TwoWeekFire => "Fire",
            StreakTier::Star => "Star",
            StreakTier::Trophy => "Trophy",
            StreakTier::Crown => "Crown",
        }
    }

    /// Encouragement shown next to the streak count.
    pub fn message(&self) -> &'static str {
        match self {
            StreakTier::Seedling => "Keep it going!",
            StreakTier::Sparkles => "Great start!",
            StreakTier::Fire => "Week on fire!",
            StreakTier::TwoWeekFire => "2-week fire!",
            StreakTier::Star => "30+ days, you're a legend!",
            StreakTier::Trophy => "Half-century hero!",
            StreakTier::Crown => "Legendary! 100+ day streak!",
        }
    }
}

/// Computes the current streak from an entry snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreakCalculator;

impl StreakCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Current streak for `entries` as of `clock`'s today.
    ///
    /// Entries with unparseable timestamps are ignored.
    pub fn current_streak(&self, entries: &[JournalEntry], clock: &DayClock) -> u32 {
        let days: BTreeSet<CalendarDay> = entry::timestamped(entries)
            .into_iter()
            .map(|(ts, _)| crate::calendar::normalize(ts))
            .collect();
        self.streak_from_days(&days, clock)
    }

    /// Streak over an already-bucketed set of days.
    pub fn streak_from_days(&self, days: &BTreeSet<CalendarDay>, clock: &DayClock) -> u32 {
        let mut streak = 0u32;
        for (i, day) in days.iter().rev().enumerate() {
            let Ok(offset) = u32::try_from(i) else {
                break;
            };
            if *day == clock.expected_day(offset) {
                streak += 1;
            } else {
                break;
            }
        }
        streak
    }
}
