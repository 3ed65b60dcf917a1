// src/common/protocol.rs

use core::time::Duration;

// Every multi-byte integer on the wire is little-endian, with no implicit
// alignment padding beyond the explicitly reserved bytes.

// === Ports (all on the server host) ===

/// TCP port for sensor registration.
pub const REGISTRATION_PORT: u16 = 4040;
/// UDP port for periodic telemetry payloads.
pub const TELEMETRY_PORT: u16 = 5050;
/// TCP port for alert notifications and their reactivation reply.
pub const ALERT_PORT: u16 = 6060;

// === Telemetry cycle ===

/// Interval between two telemetry payloads.
pub const TICK: Duration = Duration::from_secs(2);

// === Alert thresholds (strict: the boundary values do not alert) ===

/// Temperature (Celsius) above which an alert is raised.
pub const MAX_ALERT_TEMPERATURE: u8 = 50;
/// Relative humidity (percent) above which an alert is raised.
pub const MAX_ALERT_HUMIDITY: u8 = 60;
/// Air quality index below which an alert is raised.
pub const MIN_ALERT_AIR_QUALITY: u8 = 10;

// === Generator ranges (inclusive; not a wire constraint) ===

pub const MAX_TEMPERATURE: u8 = 60;
pub const MAX_HUMIDITY: u8 = 70;
pub const MAX_AIR_QUALITY: u8 = 100;
