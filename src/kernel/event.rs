use serde::{Deserialize, Serialize};
use std::fmt;

use super::segment::Segment;
use super::timeline::Filter;
use crate::services::classifier::ClassificationError;

/// Identifies one acquisition cycle. Monotonic per controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AcquisitionEpoch(pub u64);

impl AcquisitionEpoch {
    pub fn next(&self) -> Self {
        AcquisitionEpoch(self.0 + 1)
    }
}

/// The pair an acquisition is keyed on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoIdentity {
    pub api_url: String,
    pub video_id: String,
}

impl VideoIdentity {
    pub fn new(api_url: impl Into<String>, video_id: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            video_id: video_id.into(),
        }
    }
}

impl fmt::Display for VideoIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/mood/{}", self.api_url.trim_end_matches('/'), self.video_id)
    }
}

/// Everything the controller reacts to. User input, player signals and
/// acquisition completions all arrive through this one type.
#[derive(Debug, Clone)]
pub enum Event {
    /// Component mounted, or the video identity changed.
    Mount(VideoIdentity),
    AcquisitionCompleted {
        epoch: AcquisitionEpoch,
        outcome: Result<Vec<Segment>, ClassificationError>,
    },
    FilterChanged(Filter),
    /// Emitted by the playback bridge once metadata is loaded.
    DurationKnown(f64),
    /// Click on the block at this index of the last rendered view.
    BlockClicked(usize),
    Teardown,
}
