use moodline::kernel::fallback::provide_fallback;
use moodline::kernel::segment::{Mood, Segment};
use moodline::kernel::timeline::{map, ColorToken, Filter};

fn seg(t0: f64, t1: f64, mood: Mood, confidence: f64) -> Segment {
    Segment::new(t0, t1, mood, confidence).expect("valid segment")
}

#[test]
fn test_fallback_sequence_is_valid_and_fixed() {
    let fallback = provide_fallback();

    assert_eq!(fallback.len(), 4);
    for s in &fallback {
        assert!(s.t0() < s.t1());
        assert!(matches!(s.mood(), Mood::Calm | Mood::Neutral | Mood::Hype));
    }

    assert_eq!(
        fallback,
        vec![
            seg(0.0, 6.0, Mood::Calm, 0.8),
            seg(6.0, 12.0, Mood::Hype, 0.9),
            seg(12.0, 18.0, Mood::Neutral, 0.6),
            seg(18.0, 24.0, Mood::Hype, 0.85),
        ]
    );
    // Deterministic across calls
    assert_eq!(fallback, provide_fallback());
}

#[test]
fn test_proportional_position() {
    let blocks = map(&[seg(6.0, 12.0, Mood::Hype, 0.9)], 24.0, Filter::All);

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].left_percent, 25.0);
    assert_eq!(blocks[0].width_percent, 25.0);
    assert_eq!(blocks[0].seek_target, 6.0);
    assert_eq!(blocks[0].color, ColorToken::Red);
    assert_eq!(blocks[0].label, "hype (0.9)");
}

#[test]
fn test_map_is_pure() {
    let segments = provide_fallback();
    let before = segments.clone();

    let first = map(&segments, 24.0, Filter::Only(Mood::Hype));
    let second = map(&segments, 24.0, Filter::Only(Mood::Hype));

    assert_eq!(first, second);
    assert_eq!(segments, before, "map must not touch its input");
}

#[test]
fn test_hype_filter_keeps_order_and_excludes_others() {
    let blocks = map(&provide_fallback(), 24.0, Filter::Only(Mood::Hype));

    let targets: Vec<f64> = blocks.iter().map(|b| b.seek_target).collect();
    assert_eq!(targets, vec![6.0, 18.0]);
    assert!(blocks.iter().all(|b| b.color == ColorToken::Red));
}

#[test]
fn test_all_filter_keeps_everything() {
    let blocks = map(&provide_fallback(), 24.0, Filter::All);
    let colors: Vec<ColorToken> = blocks.iter().map(|b| b.color).collect();
    assert_eq!(
        colors,
        vec![ColorToken::Blue, ColorToken::Red, ColorToken::Amber, ColorToken::Red]
    );
    let total: f64 = blocks.iter().map(|b| b.width_percent).sum();
    assert!((total - 100.0).abs() < 1e-9);
}

#[test]
fn test_filter_with_no_matches_is_empty() {
    let segments = vec![seg(0.0, 3.0, Mood::Calm, 0.4)];
    assert!(map(&segments, 10.0, Filter::Only(Mood::Neutral)).is_empty());
    assert!(map(&[], 10.0, Filter::All).is_empty());
}

#[test]
fn test_overflow_is_not_clamped() {
    // Video reports 12s but segments run to 24s
    let blocks = map(&provide_fallback(), 12.0, Filter::All);

    let last = blocks.last().unwrap();
    assert_eq!(last.left_percent, 150.0);
    assert_eq!(last.width_percent, 50.0);
    assert!(last.left_percent + last.width_percent > 100.0);
}

#[test]
fn test_out_of_order_and_overlapping_input_is_mapped_as_given() {
    let segments = vec![
        seg(10.0, 20.0, Mood::Neutral, 0.6),
        seg(0.0, 15.0, Mood::Calm, 0.7),
    ];

    let blocks = map(&segments, 20.0, Filter::All);

    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].left_percent, 50.0);
    assert_eq!(blocks[1].left_percent, 0.0);
    assert_eq!(blocks[1].width_percent, 75.0);
}

#[test]
fn test_colors_follow_mood() {
    assert_eq!(ColorToken::for_mood(Mood::Hype).hex(), "#ef4444");
    assert_eq!(ColorToken::for_mood(Mood::Calm).hex(), "#60a5fa");
    assert_eq!(ColorToken::for_mood(Mood::Neutral).hex(), "#fbbf24");
}
