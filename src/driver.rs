//! Async driver around [`TimelineController`].
//!
//! User input, player signals and acquisition completions share one mpsc
//! channel, so the controller sees them as a single ordered stream. The
//! network call is the only place anything suspends.
//!
//! The driver itself only keeps a weak sender. Once every handle is gone
//! the channel closes and the driver tears down, cancelling in-flight work.

use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::sync::mpsc::error::SendError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::TimelineConfig;
use crate::kernel::controller::{SideEffect, TimelineController, TimelineView};
use crate::kernel::event::{AcquisitionEpoch, Event, VideoIdentity};
use crate::kernel::state::AcquisitionPhase;
use crate::kernel::timeline::Filter;
use crate::services::classifier::MoodClassifier;
use crate::services::playback::PlaybackBridge;
use crate::services::transcript::TranscriptProvider;

pub struct TimelineDriver<C, P, T> {
    controller: TimelineController,
    classifier: Arc<C>,
    player: P,
    transcripts: Arc<T>,
    // Weak so that dropping the last handle closes the channel
    tx: mpsc::WeakSender<Event>,
    rx: mpsc::Receiver<Event>,
    view_tx: watch::Sender<TimelineView>,
    // Cancelled on shutdown; parent of every cycle token
    lifetime: CancellationToken,
    cycle: Option<CancellationToken>,
}

/// Cloneable front door to a running driver.
#[derive(Clone)]
pub struct TimelineHandle {
    api_url: String,
    tx: mpsc::Sender<Event>,
    view: watch::Receiver<TimelineView>,
    lifetime: CancellationToken,
}

impl<C, P, T> TimelineDriver<C, P, T>
where
    C: MoodClassifier,
    P: PlaybackBridge,
    T: TranscriptProvider,
{
    pub fn new(config: &TimelineConfig, classifier: C, player: P, transcripts: T) -> (Self, TimelineHandle) {
        let (tx, rx) = mpsc::channel(config.channel_capacity.max(1));
        let (view_tx, view_rx) = watch::channel(TimelineView::default());
        let lifetime = CancellationToken::new();

        let handle = TimelineHandle {
            api_url: config.api_url.clone(),
            tx: tx.clone(),
            view: view_rx,
            lifetime: lifetime.clone(),
        };

        let driver = Self {
            controller: TimelineController::new(),
            classifier: Arc::new(classifier),
            player,
            transcripts: Arc::new(transcripts),
            tx: tx.downgrade(),
            rx,
            view_tx,
            lifetime,
            cycle: None,
        };

        (driver, handle)
    }

    /// Runs until the timeline is torn down, aborted, or every handle is
    /// dropped. Returns the controller
    /// so callers can inspect final state and telemetry.
    pub async fn run(mut self) -> TimelineController {
        info!("Timeline driver started");

        loop {
            let first = tokio::select! {
                biased;
                _ = self.lifetime.cancelled() => break,
                event = self.rx.recv() => match event {
                    Some(event) => event,
                    None => {
                        info!("All timeline handles dropped");
                        break;
                    }
                },
            };

            // Drain whatever else is queued so one step sees the whole batch
            let mut events = vec![first];
            while let Ok(event) = self.rx.try_recv() {
                events.push(event);
            }

            let effects = self.controller.step(events);
            self.execute(effects);

            if self.controller.state.phase() == AcquisitionPhase::Disposed {
                break;
            }
        }

        if self.controller.state.phase() != AcquisitionPhase::Disposed {
            self.controller.step(vec![Event::Teardown]);
        }
        if let Some(cycle) = self.cycle.take() {
            cycle.cancel();
        }
        self.lifetime.cancel();
        info!("Timeline driver stopped");
        self.controller
    }

    fn execute(&mut self, effects: Vec<SideEffect>) {
        for effect in effects {
            match effect {
                SideEffect::Acquire { epoch, identity } => self.spawn_acquisition(epoch, identity),
                SideEffect::Seek(time) => self.player.seek(time),
                SideEffect::Render(view) => {
                    self.view_tx.send_replace(view);
                }
            }
        }
    }

    fn spawn_acquisition(&mut self, epoch: AcquisitionEpoch, identity: VideoIdentity) {
        // A new cycle supersedes whatever is still in flight
        if let Some(previous) = self.cycle.take() {
            previous.cancel();
        }
        let token = self.lifetime.child_token();
        self.cycle = Some(token.clone());

        let classifier = Arc::clone(&self.classifier);
        let transcripts = Arc::clone(&self.transcripts);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let transcript = transcripts.transcript(&identity.video_id);

            tokio::select! {
                _ = token.cancelled() => {
                    debug!("Acquisition epoch {} cancelled before completion", epoch.0);
                }
                outcome = classifier.classify(transcript, identity) => {
                    if token.is_cancelled() {
                        return;
                    }
                    // No live sender or receiver means the driver already stopped
                    if let Some(tx) = tx.upgrade() {
                        let _ = tx.send(Event::AcquisitionCompleted { epoch, outcome }).await;
                    }
                }
            }
        });
    }
}

impl TimelineHandle {
    pub async fn send(&self, event: Event) -> Result<(), SendError<Event>> {
        self.tx.send(event).await
    }

    pub async fn mount(&self, video_id: impl Into<String>) -> Result<(), SendError<Event>> {
        self.send(Event::Mount(VideoIdentity::new(self.api_url.clone(), video_id))).await
    }

    pub async fn set_filter(&self, filter: Filter) -> Result<(), SendError<Event>> {
        self.send(Event::FilterChanged(filter)).await
    }

    pub async fn duration_known(&self, duration: f64) -> Result<(), SendError<Event>> {
        self.send(Event::DurationKnown(duration)).await
    }

    pub async fn click(&self, index: usize) -> Result<(), SendError<Event>> {
        self.send(Event::BlockClicked(index)).await
    }

    /// Latest rendered view. Use `changed()` on the receiver to await updates.
    pub fn view(&self) -> watch::Receiver<TimelineView> {
        self.view.clone()
    }

    /// Ordered teardown: events already queued are processed first.
    pub async fn shutdown(&self) {
        if self.tx.send(Event::Teardown).await.is_err() {
            self.lifetime.cancel();
        }
    }

    /// Immediate teardown. Queued events and in-flight requests are dropped.
    pub fn abort(&self) {
        self.lifetime.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.lifetime.is_cancelled()
    }
}
