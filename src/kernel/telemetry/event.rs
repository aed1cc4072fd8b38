use serde::{Deserialize, Serialize};

use crate::kernel::event::AcquisitionEpoch;
use crate::kernel::state::SegmentSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TelemetryEvent {
    AcquisitionRequested {
        epoch: AcquisitionEpoch,
    },

    AcquisitionCommitted {
        epoch: AcquisitionEpoch,
        source: SegmentSource,
        segments: usize,
    },

    AcquisitionFailed {
        epoch: AcquisitionEpoch,
        kind: FailureKind,
    },

    /// A completion arrived for an epoch that is no longer current.
    StaleResultDiscarded {
        epoch: AcquisitionEpoch,
    },

    Remapped {
        blocks: usize,
    },

    SeekDispatched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    Network,
    Status,
    Malformed,
}
