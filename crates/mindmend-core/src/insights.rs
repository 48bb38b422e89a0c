//! Trailing-window mood insights.
//!
//! Produces, for the entries of the last `window_days`:
//! - **entry_count**: every windowed entry, feeling or not
//! - **distribution**: per-mood counts over entries with a feeling, listed
//!   in the order each mood is first met scanning newest to oldest
//! - **dominant**: the most counted mood; ties go to the mood met first
//! - **trend**: one point per day for the last `trend_days` days, oldest
//!   first, ending today. A point is the mean mood score of that day's
//!   entries (unset counted as Neutral) or `None` when the day is empty.
//!   The trend has its own range and is not limited by `window_days`.
//!
//! Both lengths are capped at [`MAX_WINDOW_DAYS`].

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::calendar::{self, CalendarDay, DayClock};
use crate::entry::{self, JournalEntry};
use crate::mood::{self, MoodCategory};

pub const DEFAULT_WINDOW_DAYS: u32 = 30;
pub const DEFAULT_TREND_DAYS: u32 = 30;
pub const MAX_WINDOW_DAYS: u32 = 365;

/// Count of one mood inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodCount {
    pub mood: MoodCategory,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodInsights {
    pub entry_count: u32,
    pub distribution: Vec<MoodCount>,
    pub dominant: Option<MoodCategory>,
    pub trend: Vec<Option<f64>>,
}

impl MoodInsights {
    /// Sum of distribution counts; never exceeds `entry_count`.
    pub fn counted_with_feeling(&self) -> u32 {
        self.distribution.iter().map(|c| c.count).sum()
    }

    pub fn count_for(&self, mood: MoodCategory) -> u32 {
        self.distribution
            .iter()
            .find(|c| c.mood == mood)
            .map_or(0, |c| c.count)
    }
}

/// Aggregates mood statistics from an entry snapshot.
#[derive(Debug, Clone)]
pub struct MoodAggregator {
    window_days: u32,
    trend_days: u32,
}

impl Default for MoodAggregator {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            trend_days: DEFAULT_TREND_DAYS,
        }
    }
}

impl MoodAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lengths above [`MAX_WINDOW_DAYS`] are clamped.
    pub fn with_windows(window_days: u32, trend_days: u32) -> Self {
        Self {
            window_days: window_days.min(MAX_WINDOW_DAYS),
            trend_days: trend_days.min(MAX_WINDOW_DAYS),
        }
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    pub fn trend_days(&self) -> u32 {
        self.trend_days
    }

    pub fn aggregate(&self, entries: &[JournalEntry], clock: &DayClock) -> MoodInsights {
        let now = clock.now();
        let window_start = now
            .checked_sub_signed(Duration::days(i64::from(self.window_days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        let past: Vec<_> = entry::timestamped(entries)
            .into_iter()
            .filter(|(ts, _)| *ts <= now)
            .collect();
        let trend = self.trend(&past, clock);

        let mut recent: Vec<_> = past
            .into_iter()
            .filter(|(ts, _)| *ts >= window_start)
            .collect();
        // Stable: entries sharing a timestamp keep snapshot order.
        recent.sort_by(|a, b| b.0.cmp(&a.0));

        let mut distribution: Vec<MoodCount> = Vec::new();
        for (_, entry) in &recent {
            let Some(mood) = entry.feeling else {
                continue;
            };
            match distribution.iter_mut().find(|c| c.mood == mood) {
                Some(c) => c.count += 1,
                None => distribution.push(MoodCount { mood, count: 1 }),
            }
        }

        let mut dominant: Option<MoodCount> = None;
        for c in &distribution {
            if dominant.map_or(true, |d| c.count > d.count) {
                dominant = Some(*c);
            }
        }

        let insights = MoodInsights {
            entry_count: recent.len() as u32,
            distribution,
            dominant: dominant.map(|d| d.mood),
            trend,
        };
        tracing::debug!(
            entry_count = insights.entry_count,
            moods = insights.distribution.len(),
            dominant = ?insights.dominant,
            "mood insights computed"
        );
        insights
    }

    /// Daily mean scores for the trend range, oldest first.
    fn trend(&self, past: &[(DateTime<Utc>, &JournalEntry)], clock: &DayClock) -> Vec<Option<f64>> {
        if self.trend_days == 0 {
            return Vec::new();
        }
        let first_day = clock.expected_day(self.trend_days - 1);

        // day -> (score sum, entry count)
        let mut buckets: BTreeMap<CalendarDay, (u32, u32)> = BTreeMap::new();
        for (ts, entry) in past {
            let day = calendar::normalize(*ts);
            if day < first_day {
                continue;
            }
            let bucket = buckets.entry(day).or_default();
            bucket.0 += u32::from(mood::score_or_neutral(entry.feeling));
            bucket.1 += 1;
        }

        (0..self.trend_days)
            .rev()
            .map(|offset| {
                buckets
                    .get(&clock.expected_day(offset))
                    .map(|(sum, count)| f64::from(*sum) / f64::from(*count))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, d, h, 0, 0).unwrap()
    }

    fn clock() -> DayClock {
        // 2024-06-30 12:00 UTC
        DayClock::at(at(30, 12))
    }

    #[test]
    fn empty_snapshot_yields_all_none_trend() {
        let insights = MoodAggregator::new().aggregate(&[], &clock());
        assert_eq!(insights.entry_count, 0);
        assert!(insights.distribution.is_empty());
        assert_eq!(insights.dominant, None);
        assert_eq!(insights.trend.len(), 30);
        assert!(insights.trend.iter().all(Option::is_none));
    }

    #[test]
    fn unset_feelings_count_as_entries_but_not_moods() {
        let entries = vec![
            JournalEntry::new("a", Some(MoodCategory::Happy), at(30, 9)),
            JournalEntry::new("b", None, at(30, 8)),
            JournalEntry::new("c", Some(MoodCategory::Happy), at(29, 9)),
        ];
        let insights = MoodAggregator::new().aggregate(&entries, &clock());
        assert_eq!(insights.entry_count, 3);
        assert_eq!(insights.counted_with_feeling(), 2);
        assert_eq!(insights.count_for(MoodCategory::Happy), 2);
        assert_eq!(insights.dominant, Some(MoodCategory::Happy));
    }

    #[test]
    fn trend_mean_substitutes_neutral_for_unset() {
        let entries = vec![
            JournalEntry::new("a", Some(MoodCategory::Love), at(30, 9)),
            JournalEntry::new("b", None, at(30, 8)),
            JournalEntry::new("c", Some(MoodCategory::Angry), at(28, 9)),
        ];
        let insights = MoodAggregator::new().aggregate(&entries, &clock());
        // (7 + 4) / 2
        assert_eq!(insights.trend[29], Some(5.5));
        assert_eq!(insights.trend[28], None);
        assert_eq!(insights.trend[27], Some(1.0));
    }

    #[test]
    fn tie_goes_to_mood_seen_first_newest_to_oldest() {
        // Input deliberately oldest first; Calm is the newest mood.
        let entries = vec![
            JournalEntry::new("a", Some(MoodCategory::Sad), at(20, 9)),
            JournalEntry::new("b", Some(MoodCategory::Calm), at(21, 9)),
            JournalEntry::new("c", Some(MoodCategory::Sad), at(22, 9)),
            JournalEntry::new("d", Some(MoodCategory::Calm), at(23, 9)),
        ];
        let insights = MoodAggregator::new().aggregate(&entries, &clock());
        assert_eq!(insights.dominant, Some(MoodCategory::Calm));
        assert_eq!(insights.distribution[0].mood, MoodCategory::Calm);
        assert_eq!(insights.distribution[1].mood, MoodCategory::Sad);
    }

    #[test]
    fn entries_outside_window_are_excluded() {
        let entries = vec![
            JournalEntry::new("inside", Some(MoodCategory::Happy), at(30, 11)),
            JournalEntry::new("future", Some(MoodCategory::Sad), at(30, 13)),
            JournalEntry::new(
                "old",
                Some(MoodCategory::Sad),
                Utc.with_ymd_and_hms(2024, 5, 31, 11, 59, 0).unwrap(),
            ),
        ];
        let insights = MoodAggregator::new().aggregate(&entries, &clock());
        assert_eq!(insights.entry_count, 1);
        assert_eq!(insights.dominant, Some(MoodCategory::Happy));
    }

    #[test]
    fn trend_last_point_is_today() {
        let today = CalendarDay::from_ymd(2024, 6, 30).unwrap();
        let entries = vec![JournalEntry::new("a", Some(MoodCategory::Calm), at(30, 0))];
        let insights = MoodAggregator::new().aggregate(&entries, &DayClock::on_day(today));
        assert_eq!(insights.trend.len(), 30);
        assert_eq!(insights.trend[29], Some(5.0));
        assert!(insights.trend[..29].iter().all(Option::is_none));
    }

    #[test]
    fn custom_trend_length_is_respected() {
        let insights = MoodAggregator::with_windows(7, 7).aggregate(&[], &clock());
        assert_eq!(insights.trend.len(), 7);
    }

    #[test]
    fn trend_reaches_past_a_shorter_window() {
        let entries = vec![
            JournalEntry::new("a", Some(MoodCategory::Love), at(20, 9)),
            JournalEntry::new("b", Some(MoodCategory::Sad), at(30, 9)),
        ];
        let insights = MoodAggregator::with_windows(7, 30).aggregate(&entries, &clock());
        assert_eq!(insights.entry_count, 1);
        assert_eq!(insights.count_for(MoodCategory::Love), 0);
        assert_eq!(insights.trend[19], Some(7.0));
        assert_eq!(insights.trend[29], Some(2.0));
    }

    #[test]
    fn oversized_windows_are_clamped() {
        let aggregator = MoodAggregator::with_windows(u32::MAX, u32::MAX);
        assert_eq!(aggregator.window_days(), MAX_WINDOW_DAYS);
        assert_eq!(aggregator.trend_days(), MAX_WINDOW_DAYS);

        let entries = vec![JournalEntry::new("a", Some(MoodCategory::Calm), at(1, 9))];
        let insights = aggregator.aggregate(&entries, &clock());
        assert_eq!(insights.entry_count, 1);
        assert_eq!(insights.trend.len(), MAX_WINDOW_DAYS as usize);
    }

    #[test]
    fn zero_trend_days_yields_empty_trend() {
        let insights = MoodAggregator::with_windows(30, 0).aggregate(&[], &clock());
        assert!(insights.trend.is_empty());
    }
}
