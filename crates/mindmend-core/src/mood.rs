//! Mood categories.
//!
//! One authoritative table of ordinal score, label and chart color. Whether a
//! presentation layer shows the label or a pictograph is its own business.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Score substituted for an entry without a feeling when averaging a day.
pub const UNSET_MOOD_SCORE: u8 = 4;

/// A closed set of emotional states an entry can be tagged with.
///
/// Variants are declared in ordinal order, lowest (1) to highest (7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MoodCategory {
    Angry,
    Anxious,
    Sad,
    Neutral,
    Calm,
    Happy,
    Love,
}

impl MoodCategory {
    pub const ALL: [MoodCategory; 7] = [
        MoodCategory::Angry,
        MoodCategory::Anxious,
        MoodCategory::Sad,
        MoodCategory::Neutral,
        MoodCategory::Calm,
        MoodCategory::Happy,
        MoodCategory::Love,
    ];

    /// Fixed score in `1..=7`, used only for trend averaging.
    pub fn ordinal(&self) -> u8 {
        match self {
            MoodCategory::Angry => 1,
            MoodCategory::Anxious => 2,
            MoodCategory::Sad => 3,
            MoodCategory::Neutral => 4,
            MoodCategory::Calm => 5,
            MoodCategory::Happy => 6,
            MoodCategory::Love => 7,
        }
    }

    /// Reverse of [`ordinal`](Self::ordinal), for labelling a trend axis.
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.ordinal() == ordinal)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MoodCategory::Angry => "Angry",
            MoodCategory::Anxious => "Anxious",
            MoodCategory::Sad => "Sad",
            MoodCategory::Neutral => "Neutral",
            MoodCategory::Calm => "Calm",
            MoodCategory::Happy => "Happy",
            MoodCategory::Love => "Love",
        }
    }

    /// Chart color for this mood.
    pub fn color(&self) -> &'static str {
        match self {
            MoodCategory::Happy => "#A7D8A7",
            MoodCategory::Calm => "#C7E1C7",
            MoodCategory::Neutral => "#E0E0E0",
            MoodCategory::Sad => "#D8A7A7",
            MoodCategory::Anxious => "#E8C7A7",
            MoodCategory::Angry => "#E8A7A7",
            MoodCategory::Love => "#FFB3B3",
        }
    }
}

/// Score of an optional feeling, with unset counted as Neutral.
pub fn score_or_neutral(feeling: Option<MoodCategory>) -> u8 {
    feeling.map_or(UNSET_MOOD_SCORE, |m| m.ordinal())
}

impl fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMood(pub String);

impl fmt::Display for UnknownMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown mood label: {}", self.0)
    }
}

impl std::error::Error for UnknownMood {}

impl FromStr for MoodCategory {
    type Err = UnknownMood;

    /// Labels match case-insensitively, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownMood(s.to_string()))
    }
}

/// Deserialize an optional feeling, mapping empty or unknown labels to unset.
///
/// The hosted store does not constrain the column, so one odd value must not
/// reject a whole snapshot.
pub(crate) fn deserialize_feeling<'de, D>(deserializer: D) -> Result<Option<MoodCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        if s.trim().is_empty() {
            return None;
        }
        match s.parse::<MoodCategory>() {
            Ok(mood) => Some(mood),
            Err(e) => {
                tracing::warn!("treating entry feeling as unset: {e}");
                None
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_are_one_through_seven_in_declaration_order() {
        let ordinals: Vec<u8> = MoodCategory::ALL.iter().map(|m| m.ordinal()).collect();
        assert_eq!(ordinals, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(MoodCategory::Neutral.ordinal(), UNSET_MOOD_SCORE);
    }

    #[test]
    fn from_ordinal_inverts_ordinal() {
        for mood in MoodCategory::ALL {
            assert_eq!(MoodCategory::from_ordinal(mood.ordinal()), Some(mood));
        }
        assert_eq!(MoodCategory::from_ordinal(0), None);
        assert_eq!(MoodCategory::from_ordinal(8), None);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("happy".parse::<MoodCategory>(), Ok(MoodCategory::Happy));
        assert_eq!(" LOVE ".parse::<MoodCategory>(), Ok(MoodCategory::Love));
        assert!("ecstatic".parse::<MoodCategory>().is_err());
    }

    #[test]
    fn unset_scores_as_neutral() {
        assert_eq!(score_or_neutral(None), 4);
        assert_eq!(score_or_neutral(Some(MoodCategory::Angry)), 1);
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&MoodCategory::Anxious).unwrap();
        assert_eq!(json, "\"Anxious\"");
    }
}
