use super::segment::{Mood, Segment};

/// (t0, t1, mood, confidence) of the offline demo sequence.
const FALLBACK_TABLE: [(f64, f64, Mood, f64); 4] = [
    (0.0, 6.0, Mood::Calm, 0.8),
    (6.0, 12.0, Mood::Hype, 0.9),
    (12.0, 18.0, Mood::Neutral, 0.6),
    (18.0, 24.0, Mood::Hype, 0.85),
];

/// Deterministic segment sequence used when remote classification fails.
/// Pure: every call returns an equal sequence.
pub fn provide_fallback() -> Vec<Segment> {
    FALLBACK_TABLE
        .iter()
        .filter_map(|&(t0, t1, mood, confidence)| Segment::new(t0, t1, mood, confidence).ok())
        .collect()
}
