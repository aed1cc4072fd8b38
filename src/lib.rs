pub mod config;
pub mod driver;
pub mod kernel;
pub mod services;

// Re-export specific items for convenient access
pub use config::TimelineConfig;
pub use driver::{TimelineDriver, TimelineHandle};
pub use kernel::controller::{TimelineController, TimelineView, DEFAULT_DURATION_SECS};
pub use kernel::segment::{Mood, Segment};
pub use kernel::timeline::{map, Filter, RenderableBlock};
