// src/common/error.rs

use core::fmt::{Debug, Display};
use std::io;
use std::net::SocketAddr;

/// Error raised by the record codec.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum WireError {
    /// Input length does not match the record's fixed size. No partial decode is attempted.
    #[error("malformed {record} record: expected {expected} bytes, got {got}")]
    MalformedRecord {
        record: &'static str,
        expected: usize,
        got: usize,
    },
}

/// A received record that is well-formed but not what the handshake expects,
/// or one that could not be decoded at all.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ProtocolViolation {
    #[error(transparent)]
    Wire(#[from] WireError),

    /// The alert channel answered with something other than REACTIVATE.
    #[error("unexpected response to alert (message type {message_type})")]
    UnexpectedAlertResponse { message_type: u32 },
}

/// Every failure the sensor client can hit. None of them are recoverable.
///
/// `E` is the error type of the underlying channel; it defaults to
/// `std::io::Error` for the socket-backed client.
#[derive(Debug, thiserror::Error)]
pub enum SensorError<E = io::Error>
where
    E: Debug + Display,
{
    /// Invalid sensor id or unparseable arguments, detected before any I/O.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A stream connection for a handshake could not be established.
    #[error("{channel} connection to {addr} failed: {source}")]
    Connection {
        channel: &'static str,
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// The channel accepted zero bytes, or failed outright, before the record
    /// was fully written.
    #[error("transport write failure: {written} of {expected} bytes written")]
    TransportWriteFailure { written: usize, expected: usize },

    /// The peer closed or reset the channel before a full record arrived.
    #[error("transport closed: {received} of {expected} bytes received")]
    TransportClosed { received: usize, expected: usize },

    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolViolation),

    /// A telemetry datagram went out shorter than the encoded payload.
    #[error("partial payload sent: {sent} of {expected} bytes")]
    DatagramTruncated { sent: usize, expected: usize },

    /// `run` was called on a client that has already run. Registration
    /// happens once per process.
    #[error("sensor client has already run")]
    AlreadyRun,

    /// Underlying channel error not covered above.
    #[error("I/O error: {0}")]
    Io(E),
}

impl<E: Debug + Display> From<WireError> for SensorError<E> {
    fn from(e: WireError) -> Self {
        SensorError::Protocol(ProtocolViolation::Wire(e))
    }
}

/// Result alias for the socket-backed client.
pub type Result<T> = core::result::Result<T, SensorError>;
