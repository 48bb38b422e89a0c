//! Once-per-day streak badge gate.
//!
//! Decides whether the streak badge is shown today on this device and
//! whether the current streak beats the last one recorded here.
//!
//! # State
//! Two keys in a [`KeyValueStore`]:
//! - `lastStreak`: decimal string, the streak seen at the last evaluation
//! - `streakBadgeShown`: `YYYY-MM-DD`, the last day the badge was shown
//!
//! Absent or unreadable values mean "first run". The streak watermark is
//! written on every evaluation; the shown date only when the badge is shown,
//! so a day without a display never hides a later milestone.

use serde::{Deserialize, Serialize};

use crate::calendar::CalendarDay;
use crate::error::StoreError;
use crate::storage::KeyValueStore;

pub const LAST_STREAK_KEY: &str = "lastStreak";
pub const BADGE_SHOWN_KEY: &str = "streakBadgeShown";

/// Persisted gate state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationState {
    pub last_shown_date: Option<CalendarDay>,
    pub last_known_streak: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationDecision {
    pub should_show: bool,
    pub is_new_milestone: bool,
}

impl NotificationState {
    /// Pure decision for `current_streak` on `today`.
    pub fn decide(&self, current_streak: u32, today: CalendarDay) -> NotificationDecision {
        NotificationDecision {
            should_show: self.last_shown_date != Some(today),
            is_new_milestone: current_streak > self.last_known_streak,
        }
    }

    /// State after acting on `decision`.
    pub fn advance(
        &self,
        current_streak: u32,
        today: CalendarDay,
        decision: NotificationDecision,
    ) -> NotificationState {
        NotificationState {
            last_shown_date: if decision.should_show {
                Some(today)
            } else {
                self.last_shown_date
            },
            last_known_streak: current_streak,
        }
    }
}

/// Gate over an injected key-value store.
pub struct NotificationGate<S> {
    store: S,
}

impl<S: KeyValueStore> NotificationGate<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Read the persisted state.
    ///
    /// # Errors
    /// Returns an error only when the store itself fails; malformed values
    /// fall back to their first-run defaults.
    pub fn load_state(&self) -> Result<NotificationState, StoreError> {
        let last_known_streak = match self.store.get(LAST_STREAK_KEY)? {
            Some(raw) => raw.trim().parse::<u32>().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "ignoring malformed {LAST_STREAK_KEY}");
                0
            }),
            None => 0,
        };
        let last_shown_date = match self.store.get(BADGE_SHOWN_KEY)? {
            Some(raw) => raw.parse::<CalendarDay>().ok(),
            None => None,
        };
        Ok(NotificationState {
            last_shown_date,
            last_known_streak,
        })
    }

    /// Decide for today and write the new state back.
    ///
    /// Fails open: if the state cannot be read the badge is shown and the
    /// milestone is judged against a zero watermark. Write failures are
    /// logged and never change the decision.
    pub fn evaluate(&mut self, current_streak: u32, today: CalendarDay) -> NotificationDecision {
        let state = match self.load_state() {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("badge state unavailable, showing badge: {e}");
                NotificationState::default()
            }
        };

        let decision = state.decide(current_streak, today);
        let next = state.advance(current_streak, today, decision);
        self.persist(&state, &next);

        tracing::debug!(
            current_streak,
            last_known_streak = state.last_known_streak,
            should_show = decision.should_show,
            is_new_milestone = decision.is_new_milestone,
            "badge gate evaluated"
        );
        decision
    }

    /// Write the fields of `next` that differ from what was read. The
    /// watermark is always written.
    fn persist(&mut self, previous: &NotificationState, next: &NotificationState) {
        if let Err(e) = self
            .store
            .set(LAST_STREAK_KEY, &next.last_known_streak.to_string())
        {
            tracing::warn!("failed to persist {LAST_STREAK_KEY}: {e}");
        }
        if next.last_shown_date == previous.last_shown_date {
            return;
        }
        if let Some(day) = next.last_shown_date {
            if let Err(e) = self.store.set(BADGE_SHOWN_KEY, &day.to_string()) {
                tracing::warn!("failed to persist {BADGE_SHOWN_KEY}: {e}");
            }
        }
    }
}
