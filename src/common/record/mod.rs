// src/common/record/mod.rs

//! Fixed-layout binary records exchanged with the server.
//!
//! | Record | Layout | Size |
//! |---|---|---|
//! | [`SensorIdentity`] | u8 id, 16 reserved | 17 |
//! | [`AlertNotification`] | u32 message type, u8 id, 16 reserved | 21 |
//! | [`TelemetryPayload`] | u64 timestamp, u8 temperature, u8 humidity, u8 air quality | 11 |
//!
//! Sizes are summed from the field types, never written out by hand.
//! Reserved bytes are zero on send and ignored on receive.

mod alert;
mod identity;
mod payload;

pub use alert::{AlertKind, AlertNotification};
pub use identity::SensorIdentity;
pub use payload::{PayloadReport, TelemetryPayload};

use super::error::WireError;
use arrayvec::ArrayVec;

/// Length of the reserved padding carried by identity and alert records.
pub const RESERVED_LEN: usize = 16;

const fn max(a: usize, b: usize) -> usize {
    if a > b {
        a
    } else {
        b
    }
}

/// Largest encoded size of any record; bounds the stack buffers used for I/O.
pub const MAX_RECORD_SIZE: usize = max(
    SensorIdentity::SIZE,
    max(AlertNotification::SIZE, TelemetryPayload::SIZE),
);

/// An encoded record, held on the stack.
pub type EncodedRecord = ArrayVec<u8, MAX_RECORD_SIZE>;

/// A record with a fixed wire layout.
pub trait WireRecord: Sized {
    /// Name used in diagnostics.
    const NAME: &'static str;
    /// Exact encoded size in bytes.
    const SIZE: usize;

    /// Writes the record into `out`, which is exactly `SIZE` bytes long and zeroed.
    fn write_fields(&self, out: &mut [u8]);

    /// Reads the record from `bytes`, which is exactly `SIZE` bytes long.
    fn read_fields(bytes: &[u8]) -> Self;

    fn encode(&self) -> EncodedRecord {
        let mut out = EncodedRecord::from([0u8; MAX_RECORD_SIZE]);
        out.truncate(Self::SIZE);
        self.write_fields(&mut out);
        out
    }

    fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        if bytes.len() != Self::SIZE {
            return Err(WireError::MalformedRecord {
                record: Self::NAME,
                expected: Self::SIZE,
                got: bytes.len(),
            });
        }
        Ok(Self::read_fields(bytes))
    }
}

// Little-endian field helpers shared by the record modules.

pub(crate) fn read_u32_le(bytes: &[u8], at: usize) -> u32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&bytes[at..at + 4]);
    u32::from_le_bytes(raw)
}

pub(crate) fn read_u64_le(bytes: &[u8], at: usize) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[at..at + 8]);
    u64::from_le_bytes(raw)
}
