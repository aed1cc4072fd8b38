//! Projection of a segment sequence onto a proportional horizontal bar.
//!
//! # PURITY INVARIANT
//! [`map`] never mutates its input and never yields; identical inputs give
//! identical outputs. Positions are NOT clamped: a segment ending past
//! `duration` produces `left + width > 100`, and the bar overflows.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::segment::{Mood, Segment};

/// View filter over moods. Never mutates the segment sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Filter {
    #[default]
    All,
    Only(Mood),
}

impl Filter {
    pub fn admits(&self, mood: Mood) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(wanted) => *wanted == mood,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("all"),
            Filter::Only(mood) => write!(f, "{}", mood),
        }
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Filter::All);
        }
        s.parse::<Mood>()
            .map(Filter::Only)
            .map_err(|_| format!("unknown filter '{}', expected all|calm|neutral|hype", s))
    }
}

impl TryFrom<String> for Filter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Filter> for String {
    fn from(filter: Filter) -> Self {
        filter.to_string()
    }
}

/// Color tokens of the bar palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorToken {
    Red,
    Blue,
    Amber,
}

impl ColorToken {
    pub fn hex(&self) -> &'static str {
        match self {
            ColorToken::Red => "#ef4444",
            ColorToken::Blue => "#60a5fa",
            ColorToken::Amber => "#fbbf24",
        }
    }

    /// Total over moods: hype is red, calm is blue, everything else amber.
    pub fn for_mood(mood: Mood) -> Self {
        match mood {
            Mood::Hype => ColorToken::Red,
            Mood::Calm => ColorToken::Blue,
            _ => ColorToken::Amber,
        }
    }
}

/// Derived visual projection of one segment. Recomputed, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderableBlock {
    pub left_percent: f64,
    pub width_percent: f64,
    pub color: ColorToken,
    pub seek_target: f64,
    pub label: String,
}

/// Maps segments onto the bar.
///
/// `duration` must be positive; substituting a default for unknown durations
/// is the caller's job (see `kernel::controller::DEFAULT_DURATION_SECS`).
pub fn map(segments: &[Segment], duration: f64, filter: Filter) -> Vec<RenderableBlock> {
    segments
        .iter()
        .filter(|seg| filter.admits(seg.mood()))
        .map(|seg| RenderableBlock {
            left_percent: (seg.t0() / duration) * 100.0,
            width_percent: ((seg.t1() - seg.t0()) / duration) * 100.0,
            color: ColorToken::for_mood(seg.mood()),
            seek_target: seg.t0(),
            label: format!("{} ({})", seg.mood(), seg.confidence()),
        })
        .collect()
}

/// Legend entries in display order.
pub fn legend() -> [(Mood, ColorToken); 3] {
    [
        (Mood::Hype, ColorToken::for_mood(Mood::Hype)),
        (Mood::Neutral, ColorToken::for_mood(Mood::Neutral)),
        (Mood::Calm, ColorToken::for_mood(Mood::Calm)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_parses_wire_names() {
        assert_eq!("all".parse::<Filter>(), Ok(Filter::All));
        assert_eq!("hype".parse::<Filter>(), Ok(Filter::Only(Mood::Hype)));
        assert!("loud".parse::<Filter>().is_err());
        assert_eq!(Filter::Only(Mood::Calm).to_string(), "calm");
    }

    #[test]
    fn legend_follows_palette() {
        let hexes: Vec<_> = legend().iter().map(|(_, c)| c.hex()).collect();
        assert_eq!(hexes, vec!["#ef4444", "#fbbf24", "#60a5fa"]);
    }
}
