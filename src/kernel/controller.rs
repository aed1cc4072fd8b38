use tracing::{debug, info, warn};

use super::event::{AcquisitionEpoch, Event, VideoIdentity};
use super::fallback::provide_fallback;
use super::segment::Segment;
use super::state::{AcquisitionPhase, SegmentSource, StateDelta, TimelineState};
use super::telemetry::event::TelemetryEvent;
use super::telemetry::recorder::TelemetryRecorder;
use super::timeline::{self, Filter, RenderableBlock};
use crate::services::classifier::ClassificationError;

/// Duration substituted while the player has not reported a usable one.
pub const DEFAULT_DURATION_SECS: f64 = 24.0;

/// `duration` if it is known, finite and positive, else the default.
pub fn effective_duration(duration: Option<f64>) -> f64 {
    match duration {
        Some(d) if d.is_finite() && d > 0.0 => d,
        _ => DEFAULT_DURATION_SECS,
    }
}

/// Snapshot handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineView {
    pub blocks: Vec<RenderableBlock>,
    pub filter: Filter,
    pub duration: f64,
    pub source: Option<SegmentSource>,
}

impl Default for TimelineView {
    fn default() -> Self {
        Self {
            blocks: Vec::new(),
            filter: Filter::All,
            duration: DEFAULT_DURATION_SECS,
            source: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SideEffect {
    /// Issue exactly one classification request for this cycle.
    Acquire { epoch: AcquisitionEpoch, identity: VideoIdentity },
    /// Move the player to this time and resume playback.
    Seek(f64),
    Render(TimelineView),
}

/// Acquisition state machine plus view state for one timeline.
pub struct TimelineController {
    pub state: TimelineState,
    pub telemetry: TelemetryRecorder,
    epoch: AcquisitionEpoch,
}

impl Default for TimelineController {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelineController {
    pub fn new() -> Self {
        Self {
            state: TimelineState::new(),
            telemetry: TelemetryRecorder::new(),
            epoch: AcquisitionEpoch(0),
        }
    }

    /// Pure step: folds a batch of events into state and returns the side
    /// effects for the driver to execute. MUST NOT await.
    pub fn step(&mut self, events: Vec<Event>) -> Vec<SideEffect> {
        let mut effects = Vec::new();

        for event in events {
            if self.state.phase() == AcquisitionPhase::Disposed {
                debug!("Controller disposed, dropping {:?}", event);
                continue;
            }

            match event {
                Event::Mount(identity) => self.on_mount(identity, &mut effects),
                Event::AcquisitionCompleted { epoch, outcome } => {
                    if self.on_completion(epoch, outcome) {
                        self.remap(&mut effects);
                    }
                }
                Event::FilterChanged(filter) => {
                    self.state.reduce(StateDelta::FilterSet(filter));
                    self.remap(&mut effects);
                }
                Event::DurationKnown(duration) => {
                    self.state.reduce(StateDelta::DurationSet(duration));
                    self.remap(&mut effects);
                }
                Event::BlockClicked(index) => match self.state.blocks().get(index) {
                    Some(block) => {
                        self.telemetry.record(TelemetryEvent::SeekDispatched);
                        effects.push(SideEffect::Seek(block.seek_target));
                    }
                    None => debug!("Click on missing block {}", index),
                },
                Event::Teardown => {
                    info!("Timeline torn down at state version {}", self.state.version);
                    self.state.reduce(StateDelta::Disposed);
                }
            }
        }

        effects
    }

    pub fn current_epoch(&self) -> AcquisitionEpoch {
        self.epoch
    }

    pub fn view(&self) -> TimelineView {
        TimelineView {
            blocks: self.state.blocks().to_vec(),
            filter: self.state.filter(),
            duration: effective_duration(self.state.duration()),
            source: self.state.source(),
        }
    }

    fn on_mount(&mut self, identity: VideoIdentity, effects: &mut Vec<SideEffect>) {
        if self.state.phase() != AcquisitionPhase::Idle
            && self.state.identity() == Some(&identity)
        {
            debug!("Identity {} already acquired, ignoring remount", identity);
            return;
        }

        self.epoch = self.epoch.next();
        info!("Acquiring moods for {} (epoch {})", identity, self.epoch.0);
        self.state.reduce(StateDelta::AcquisitionStarted {
            identity: identity.clone(),
            epoch: self.epoch,
        });
        self.telemetry.record(TelemetryEvent::AcquisitionRequested { epoch: self.epoch });
        effects.push(SideEffect::Acquire { epoch: self.epoch, identity });
        self.remap(effects);
    }

    /// Returns true when the completion was committed.
    fn on_completion(
        &mut self,
        epoch: AcquisitionEpoch,
        outcome: Result<Vec<Segment>, ClassificationError>,
    ) -> bool {
        // STALE REJECTION: only the in-flight epoch may commit.
        if self.state.phase() != (AcquisitionPhase::Acquiring { epoch }) {
            debug!("Discarded stale acquisition result for epoch {}", epoch.0);
            self.telemetry.record(TelemetryEvent::StaleResultDiscarded { epoch });
            return false;
        }

        let (segments, source) = match outcome {
            Ok(segments) => (segments, SegmentSource::Remote),
            Err(err) => {
                warn!("Mood classification failed ({:?}): {}. Using fallback.", err.kind(), err);
                self.telemetry.record(TelemetryEvent::AcquisitionFailed { epoch, kind: err.kind() });
                (provide_fallback(), SegmentSource::Fallback)
            }
        };

        info!("Committed {} segments from {:?}", segments.len(), source);
        self.telemetry.record(TelemetryEvent::AcquisitionCommitted {
            epoch,
            source,
            segments: segments.len(),
        });
        self.state.reduce(StateDelta::SegmentsCommitted { segments, source });
        true
    }

    fn remap(&mut self, effects: &mut Vec<SideEffect>) {
        let duration = effective_duration(self.state.duration());
        let blocks = timeline::map(self.state.segments(), duration, self.state.filter());
        self.telemetry.record(TelemetryEvent::Remapped { blocks: blocks.len() });
        self.state.reduce(StateDelta::BlocksRendered(blocks));
        effects.push(SideEffect::Render(self.view()));
    }
}
