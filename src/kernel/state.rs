use serde::{Deserialize, Serialize};

use super::event::{AcquisitionEpoch, VideoIdentity};
use super::segment::Segment;
use super::timeline::{Filter, RenderableBlock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentSource {
    Remote,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionPhase {
    Idle,
    Acquiring { epoch: AcquisitionEpoch },
    /// Terminal for the cycle. Filter and duration changes stay here.
    Ready { source: SegmentSource },
    Disposed,
}

/// Strict state delta. This is the ONLY way state mutates.
#[derive(Debug, Clone)]
pub enum StateDelta {
    /// Starts a cycle and discards the previous sequence and duration.
    AcquisitionStarted { identity: VideoIdentity, epoch: AcquisitionEpoch },
    /// Replaces the sequence wholesale.
    SegmentsCommitted { segments: Vec<Segment>, source: SegmentSource },
    FilterSet(Filter),
    DurationSet(f64),
    BlocksRendered(Vec<RenderableBlock>),
    Disposed,
}

/// Controller-owned timeline state. The mapper and renderer only ever see
/// snapshots of it.
#[derive(Debug, Clone)]
pub struct TimelineState {
    phase: AcquisitionPhase,
    identity: Option<VideoIdentity>,
    segments: Vec<Segment>,
    filter: Filter,
    duration: Option<f64>,
    blocks: Vec<RenderableBlock>,
    // Monotonic version, bumped on every reduction
    pub version: u64,
}

impl Default for TimelineState {
    fn default() -> Self {
        Self {
            phase: AcquisitionPhase::Idle,
            identity: None,
            segments: Vec::new(),
            filter: Filter::All,
            duration: None,
            blocks: Vec::new(),
            version: 0,
        }
    }
}

impl TimelineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reduce(&mut self, delta: StateDelta) {
        match delta {
            StateDelta::AcquisitionStarted { identity, epoch } => {
                self.identity = Some(identity);
                self.segments.clear();
                self.blocks.clear();
                // The new video reports its own duration
                self.duration = None;
                self.phase = AcquisitionPhase::Acquiring { epoch };
            }
            StateDelta::SegmentsCommitted { segments, source } => {
                self.segments = segments;
                self.phase = AcquisitionPhase::Ready { source };
            }
            StateDelta::FilterSet(filter) => self.filter = filter,
            StateDelta::DurationSet(duration) => self.duration = Some(duration),
            StateDelta::BlocksRendered(blocks) => self.blocks = blocks,
            StateDelta::Disposed => self.phase = AcquisitionPhase::Disposed,
        }
        self.version += 1;
    }

    pub fn phase(&self) -> AcquisitionPhase {
        self.phase
    }

    pub fn identity(&self) -> Option<&VideoIdentity> {
        self.identity.as_ref()
    }

    /// Most recently committed sequence. Empty while acquiring.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn blocks(&self) -> &[RenderableBlock] {
        &self.blocks
    }

    pub fn source(&self) -> Option<SegmentSource> {
        match self.phase {
            AcquisitionPhase::Ready { source } => Some(source),
            _ => None,
        }
    }
}
