//! Acquisition and interaction telemetry.
//!
//! # SAFETY INVARIANT
//! Telemetry is a READ-ONLY side-effect layer.
//! The controller writes to it but never branches on it.
//!
//! # PRIVACY INVARIANT
//! Events never carry transcript text. Only epochs, counts and error kinds.

pub mod event;
pub mod metrics;
pub mod recorder;
