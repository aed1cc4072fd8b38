use std::collections::VecDeque;
use super::event::{FailureKind, TelemetryEvent};
use crate::kernel::state::SegmentSource;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetrySnapshot {
    pub acquisition_stats: AcquisitionStats,
    pub interaction_stats: InteractionStats,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcquisitionStats {
    pub requested: u64,
    pub remote: u64,
    pub fallback: u64,
    pub network_failures: u64,
    pub status_failures: u64,
    pub malformed_failures: u64,
    pub stale_discarded: u64,
    /// Share of committed cycles that ended on the fallback sequence.
    pub fallback_ratio: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionStats {
    pub remaps: u64,
    pub blocks_rendered: u64,
    pub seeks: u64,
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    for event in events {
        match event {
            TelemetryEvent::AcquisitionRequested { .. } => snap.acquisition_stats.requested += 1,
            TelemetryEvent::AcquisitionCommitted { source, .. } => match source {
                SegmentSource::Remote => snap.acquisition_stats.remote += 1,
                SegmentSource::Fallback => snap.acquisition_stats.fallback += 1,
            },
            TelemetryEvent::AcquisitionFailed { kind, .. } => match kind {
                FailureKind::Network => snap.acquisition_stats.network_failures += 1,
                FailureKind::Status => snap.acquisition_stats.status_failures += 1,
                FailureKind::Malformed => snap.acquisition_stats.malformed_failures += 1,
            },
            TelemetryEvent::StaleResultDiscarded { .. } => snap.acquisition_stats.stale_discarded += 1,
            TelemetryEvent::Remapped { blocks } => {
                snap.interaction_stats.remaps += 1;
                snap.interaction_stats.blocks_rendered += *blocks as u64;
            }
            TelemetryEvent::SeekDispatched => snap.interaction_stats.seeks += 1,
        }
    }

    let committed = snap.acquisition_stats.remote + snap.acquisition_stats.fallback;
    if committed > 0 {
        snap.acquisition_stats.fallback_ratio = snap.acquisition_stats.fallback as f64 / committed as f64;
    }

    snap
}
