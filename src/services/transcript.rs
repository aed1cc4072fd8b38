/// Transcript used when nothing better is supplied.
pub const DEMO_TRANSCRIPT: &str = "\
[00:00:00] This is a calm introduction. Welcome to the demo video.
[00:00:06] Now things get a bit more exciting! Wow, amazing scene!
[00:00:12] Back to neutral explanation and calm voice.
[00:00:18] Finale: intense, epic, what a banger!
";

/// Source of the transcript sent for classification. Injected into the
/// driver; the core never reads it from ambient state.
pub trait TranscriptProvider: Send + Sync + 'static {
    fn transcript(&self, video_id: &str) -> String;
}

/// Same text for every video.
#[derive(Debug, Clone)]
pub struct StaticTranscript {
    text: String,
}

impl StaticTranscript {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn demo() -> Self {
        Self::new(DEMO_TRANSCRIPT)
    }
}

impl Default for StaticTranscript {
    fn default() -> Self {
        Self::demo()
    }
}

impl TranscriptProvider for StaticTranscript {
    fn transcript(&self, _video_id: &str) -> String {
        self.text.clone()
    }
}
