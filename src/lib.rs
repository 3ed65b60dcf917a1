// src/lib.rs

//! Client side of a minimal sensor telemetry protocol.
//!
//! A sensor registers over TCP, streams fixed-size telemetry records over
//! UDP, and raises alerts on a separate TCP channel, blocking until the
//! server sends a reactivation.

pub mod client;
pub mod common;
pub mod config;
pub mod readings;

// Re-export key types for convenience
pub use client::{ClientState, RunSummary, SensorClient};
pub use common::{Result, SensorError, SensorId};
pub use config::{Args, ClientConfig};
