// src/client/registration.rs

use super::io_helpers::send_record;
use crate::common::{error::SensorError, Result, SensorIdentity, StreamChannel};
use std::net::{SocketAddr, TcpStream};

/// Sends the identity record over an already open control channel.
///
/// The protocol has no registration acknowledgement: success means every
/// byte was written.
pub fn register_over<C: StreamChannel>(
    channel: &mut C,
    identity: &SensorIdentity,
) -> core::result::Result<(), SensorError<C::Error>> {
    send_record(channel, identity)?;
    log::debug!("sent identity record for sensor {}", identity.id);
    Ok(())
}

/// Registration handshake: connect, send the identity, close.
///
/// Single attempt; a refused connection is fatal. The stream is dropped (and
/// closed) on every exit path.
pub fn register(identity: &SensorIdentity, addr: SocketAddr) -> Result<()> {
    let mut stream = TcpStream::connect(addr).map_err(|source| SensorError::Connection {
        channel: "registration",
        addr,
        source,
    })?;
    register_over(&mut stream, identity)?;
    log::info!("sensor {} registered with {addr}", identity.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::io_helpers::mock::MockStream;
    use super::*;
    use crate::common::{SensorId, WireRecord};
    use std::io::Read;
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn test_register_over_partial_writes() {
        let mut channel = MockStream::new();
        channel.write_limit = Some(5);
        let identity = SensorIdentity::new(SensorId::from(7));
        register_over(&mut channel, &identity).unwrap();
        assert_eq!(channel.written, identity.encode().as_slice());
        assert_eq!(channel.write_calls, 4);
    }

    #[test]
    fn test_register_over_broken_channel() {
        let mut channel = MockStream::new();
        channel.write_capacity = 0;
        let identity = SensorIdentity::new(SensorId::from(7));
        assert!(matches!(
            register_over(&mut channel, &identity),
            Err(SensorError::TransportWriteFailure { written: 0, expected: 17 })
        ));
    }

    #[test]
    fn test_register_sends_identity_and_closes() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = thread::spawn(move || {
            let (mut conn, _) = listener.accept().unwrap();
            let mut received = Vec::new();
            // read_to_end only returns once the client has closed the stream
            conn.read_to_end(&mut received).unwrap();
            received
        });

        register(&SensorIdentity::new(SensorId::from(42)), addr).unwrap();
        let received = server.join().unwrap();
        assert_eq!(received.len(), SensorIdentity::SIZE);
        assert_eq!(SensorIdentity::decode(&received).unwrap().id.as_u8(), 42);
    }

    #[test]
    fn test_register_connection_refused() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let result = register(&SensorIdentity::new(SensorId::from(1)), addr);
        assert!(matches!(
            result,
            Err(SensorError::Connection { channel: "registration", .. })
        ));
    }
}
