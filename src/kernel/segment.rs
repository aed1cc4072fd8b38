use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of moods the classifier may emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Calm,
    Neutral,
    Hype,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Calm => "calm",
            Mood::Neutral => "neutral",
            Mood::Hype => "hype",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = MalformedSegment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "calm" => Ok(Mood::Calm),
            "neutral" => Ok(Mood::Neutral),
            "hype" => Ok(Mood::Hype),
            other => Err(MalformedSegment::UnknownMood(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MalformedSegment {
    #[error("segment interval is empty or inverted: t0={t0}, t1={t1}")]
    EmptyInterval { t0: f64, t1: f64 },
    #[error("confidence {0} outside [0, 1]")]
    ConfidenceOutOfRange(f64),
    #[error("unknown mood '{0}'")]
    UnknownMood(String),
}

/// One contiguous mood interval. Only constructible through [`Segment::new`],
/// so every value in circulation satisfies `t1 > t0` and `confidence in [0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    t0: f64,
    t1: f64,
    mood: Mood,
    confidence: f64,
}

impl Segment {
    pub fn new(t0: f64, t1: f64, mood: Mood, confidence: f64) -> Result<Self, MalformedSegment> {
        // Negated comparisons so NaN falls on the rejecting side.
        if !(t1 > t0) {
            return Err(MalformedSegment::EmptyInterval { t0, t1 });
        }
        if !(0.0..=1.0).contains(&confidence) {
            return Err(MalformedSegment::ConfidenceOutOfRange(confidence));
        }
        Ok(Self { t0, t1, mood, confidence })
    }

    pub fn t0(&self) -> f64 {
        self.t0
    }

    pub fn t1(&self) -> f64 {
        self.t1
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn duration(&self) -> f64 {
        self.t1 - self.t0
    }
}

/// Segment as it arrives over the wire, before validation.
/// `mood` stays a string so unknown names surface as [`MalformedSegment::UnknownMood`]
/// instead of a generic decode failure.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSegment {
    pub t0: f64,
    pub t1: f64,
    pub mood: String,
    pub confidence: f64,
}

impl TryFrom<RawSegment> for Segment {
    type Error = MalformedSegment;

    fn try_from(raw: RawSegment) -> Result<Self, Self::Error> {
        let mood = raw.mood.parse::<Mood>()?;
        Segment::new(raw.t0, raw.t1, mood, raw.confidence)
    }
}
