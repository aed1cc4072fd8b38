pub mod classifier;
pub mod playback;
pub mod transcript;
