//! Calendar-day arithmetic.
//!
//! Every bucket key is the UTC date of an instant, and "today" is the UTC
//! date of the evaluation's reference instant. The device zone is never
//! consulted.

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DAY_FORMAT: &str = "%Y-%m-%d";

/// A date-only aggregation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDay(NaiveDate);

impl CalendarDay {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The day `n` days before this one, saturating at the earliest
    /// representable date.
    pub fn days_before(&self, n: u32) -> Self {
        Self(
            self.0
                .checked_sub_days(Days::new(u64::from(n)))
                .unwrap_or(NaiveDate::MIN),
        )
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_FORMAT))
    }
}

impl FromStr for CalendarDay {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DAY_FORMAT).map(Self)
    }
}

/// Truncate an instant to its UTC calendar day.
pub fn normalize(timestamp: DateTime<Utc>) -> CalendarDay {
    CalendarDay(timestamp.date_naive())
}

/// Parse a stored `created_at` value.
///
/// Accepts RFC 3339 with any offset and the offset-less
/// `YYYY-MM-DDTHH:MM:SS[.fff]` form (read as UTC). Returns `None` for
/// anything else; callers drop such records.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Fixes "now" for one evaluation so that every component agrees on today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayClock {
    now: DateTime<Utc>,
}

impl DayClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn system() -> Self {
        Self::at(Utc::now())
    }

    /// Clock pinned to noon UTC on `day`.
    pub fn on_day(day: CalendarDay) -> Self {
        Self::at(day.date().and_hms_opt(12, 0, 0).unwrap_or_default().and_utc())
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn today(&self) -> CalendarDay {
        normalize(self.now)
    }

    /// Today minus `n` whole days.
    pub fn expected_day(&self, n: u32) -> CalendarDay {
        self.today().days_before(n)
    }
}
