// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod channel;
pub mod error;
pub mod protocol;
pub mod record;
pub mod sensor_id;

// --- Re-export key types/traits for easier access ---

// From channel.rs
pub use channel::{DatagramChannel, StdTimer, StreamChannel, TelemetrySocket, Timer};

// From error.rs
pub use error::{ProtocolViolation, Result, SensorError, WireError};

// From record/mod.rs (and its sub-modules via its own `pub use`)
pub use record::{
    AlertKind, AlertNotification, EncodedRecord, SensorIdentity, TelemetryPayload, WireRecord,
    MAX_RECORD_SIZE,
};

// From sensor_id.rs
pub use sensor_id::SensorId;

// Protocol constants stay namespaced: common::protocol::*
