pub mod controller;
pub mod event;
pub mod fallback;
pub mod segment;
pub mod state;
pub mod telemetry;
pub mod timeline;
