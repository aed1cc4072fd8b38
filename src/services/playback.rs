use tracing::{debug, warn};

/// Seek capability of the external video player.
///
/// `seek` moves the playhead and resumes playback. Repeated calls with the
/// same time must be harmless.
pub trait PlaybackBridge: Send + 'static {
    fn seek(&mut self, time: f64);
}

/// Player stand-in with no decoder behind it. Tracks the playhead so the
/// CLI and tests can observe seeks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessPlayer {
    pub position: f64,
    pub playing: bool,
    pub seeks: Vec<f64>,
}

impl HeadlessPlayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlaybackBridge for HeadlessPlayer {
    fn seek(&mut self, time: f64) {
        debug!("Seek to {:.2}s", time);
        self.position = time;
        self.playing = true;
        self.seeks.push(time);
    }
}

impl<P: PlaybackBridge> PlaybackBridge for std::sync::Arc<std::sync::Mutex<P>> {
    fn seek(&mut self, time: f64) {
        match self.lock() {
            Ok(mut player) => player.seek(time),
            Err(_) => warn!("Player lock poisoned, dropping seek to {:.2}s", time),
        }
    }
}
