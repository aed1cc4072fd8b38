use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEMO_VIDEO_SRC: &str = "https://interactive-examples.mdn.mozilla.net/media/cc0-videos/flower.mp4";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("api_url must not be empty")]
    EmptyApiUrl,
    #[error("video_id must not be empty")]
    EmptyVideoId,
    #[error("request timeout must be positive")]
    ZeroTimeout,
    #[error("channel capacity must be positive")]
    ZeroCapacity,
    #[error("invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },
}

/// Values consumed when a timeline is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Locator of the video resource. Opaque to the core.
    pub video_src: String,
    /// Base URL of the classification service.
    pub api_url: String,
    pub video_id: String,
    pub request_timeout_ms: u64,
    pub channel_capacity: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            video_src: DEMO_VIDEO_SRC.to_string(),
            api_url: "http://localhost:8000".to_string(),
            video_id: "demo-video".to_string(),
            request_timeout_ms: 5_000,
            channel_capacity: 64,
        }
    }
}

impl TimelineConfig {
    /// Defaults overlaid with `MOODLINE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with whatever `lookup` returns for each `MOODLINE_*` key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(v) = lookup("MOODLINE_API_URL") {
            config.api_url = v;
        }
        if let Some(v) = lookup("MOODLINE_VIDEO_SRC") {
            config.video_src = v;
        }
        if let Some(v) = lookup("MOODLINE_VIDEO_ID") {
            config.video_id = v;
        }
        if let Some(v) = lookup("MOODLINE_TIMEOUT_MS") {
            config.request_timeout_ms = v.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "MOODLINE_TIMEOUT_MS",
                value: v.clone(),
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::EmptyApiUrl);
        }
        if self.video_id.trim().is_empty() {
            return Err(ConfigError::EmptyVideoId);
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
