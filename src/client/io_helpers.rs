// src/client/io_helpers.rs

//! Byte-exact transfer over a [`StreamChannel`].
//!
//! Stream sockets may accept or deliver fewer bytes than asked for. These
//! helpers are the only place that deals with it; the handshakes above them
//! always move whole records.

use crate::common::{
    error::SensorError,
    record::{WireRecord, MAX_RECORD_SIZE},
    StreamChannel,
};

/// Writes all of `bytes`, looping over partial writes.
///
/// A write that accepts zero bytes or fails outright means the channel is
/// broken and fails the whole transfer with `TransportWriteFailure`.
/// `WouldBlock` is retried.
pub fn send_exact<C: StreamChannel>(
    channel: &mut C,
    bytes: &[u8],
) -> Result<(), SensorError<C::Error>> {
    let mut offset = 0;
    while offset < bytes.len() {
        let written = match nb::block!(channel.write(&bytes[offset..])) {
            Ok(n) => n,
            Err(e) => {
                log::debug!("write failed after {offset}/{} bytes: {e}", bytes.len());
                0
            }
        };
        if written == 0 {
            return Err(SensorError::TransportWriteFailure {
                written: offset,
                expected: bytes.len(),
            });
        }
        offset += written;
        log::trace!("wrote {written} bytes ({offset}/{})", bytes.len());
    }
    Ok(())
}

/// Fills `buffer` completely, looping over partial reads.
///
/// A read of zero bytes means the peer closed, and a failed read means it
/// reset the connection. Both fail with `TransportClosed`; a short buffer is
/// never returned.
pub fn recv_exact<C: StreamChannel>(
    channel: &mut C,
    buffer: &mut [u8],
) -> Result<(), SensorError<C::Error>> {
    let mut received = 0;
    while received < buffer.len() {
        let n = match nb::block!(channel.read(&mut buffer[received..])) {
            Ok(n) => n,
            Err(e) => {
                log::debug!("read failed after {received}/{} bytes: {e}", buffer.len());
                0
            }
        };
        if n == 0 {
            return Err(SensorError::TransportClosed {
                received,
                expected: buffer.len(),
            });
        }
        received += n;
        log::trace!("read {n} bytes ({received}/{})", buffer.len());
    }
    Ok(())
}

/// Encodes `record` and sends it with [`send_exact`].
pub fn send_record<C: StreamChannel, R: WireRecord>(
    channel: &mut C,
    record: &R,
) -> Result<(), SensorError<C::Error>> {
    send_exact(channel, &record.encode())
}

/// Receives exactly one `R`-sized record with [`recv_exact`] and decodes it.
pub fn recv_record<C: StreamChannel, R: WireRecord>(
    channel: &mut C,
) -> Result<R, SensorError<C::Error>> {
    let mut buffer = [0u8; MAX_RECORD_SIZE];
    let buffer = &mut buffer[..R::SIZE];
    recv_exact(channel, buffer)?;
    Ok(R::decode(buffer)?)
}
