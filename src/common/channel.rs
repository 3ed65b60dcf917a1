// src/common/channel.rs

use core::fmt::{Debug, Display};
use core::time::Duration;
use std::io::{self, Read, Write};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, TcpStream, UdpSocket};

/// Abstraction for the tick delay between telemetry cycles.
pub trait Timer {
    /// Delay for at least `duration`.
    fn delay(&mut self, duration: Duration);
}

impl<T: Timer + ?Sized> Timer for &mut T {
    fn delay(&mut self, duration: Duration) {
        (**self).delay(duration)
    }
}

/// `Timer` backed by `std::thread::sleep`.
#[derive(Debug, Default, Copy, Clone)]
pub struct StdTimer;

impl Timer for StdTimer {
    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Byte-stream channel used by the registration and alert handshakes.
///
/// Both calls may transfer fewer bytes than requested. `Ok(0)` from `write`
/// means the channel is unusable; `Ok(0)` from `read` means the peer closed.
pub trait StreamChannel {
    /// Associated error type for communication errors.
    type Error: Debug + Display;

    /// Attempts to write some prefix of `buf`, returning how many bytes were accepted.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` if the call should simply be retried.
    fn write(&mut self, buf: &[u8]) -> nb::Result<usize, Self::Error>;

    /// Attempts to read into `buf`, returning how many bytes arrived.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` if the call should simply be retried.
    fn read(&mut self, buf: &mut [u8]) -> nb::Result<usize, Self::Error>;
}

/// Fire-and-forget channel used for telemetry.
pub trait DatagramChannel {
    type Error: Debug + Display;

    /// Sends `buf` as one datagram, returning how many bytes went out.
    fn send(&mut self, buf: &[u8]) -> nb::Result<usize, Self::Error>;
}

/// Retryable conditions become `WouldBlock`; everything else is passed through.
fn classify(e: io::Error) -> nb::Error<io::Error> {
    match e.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted => nb::Error::WouldBlock,
        _ => nb::Error::Other(e),
    }
}

impl StreamChannel for TcpStream {
    type Error = io::Error;

    fn write(&mut self, buf: &[u8]) -> nb::Result<usize, io::Error> {
        Write::write(self, buf).map_err(classify)
    }

    fn read(&mut self, buf: &mut [u8]) -> nb::Result<usize, io::Error> {
        Read::read(self, buf).map_err(classify)
    }
}

/// The telemetry channel: a UDP socket plus its fixed destination.
///
/// Held open for the whole streaming phase and closed on drop.
#[derive(Debug)]
pub struct TelemetrySocket {
    socket: UdpSocket,
    target: SocketAddr,
}

impl TelemetrySocket {
    /// Binds an ephemeral local port of the same address family as `target`.
    pub fn open(target: SocketAddr) -> io::Result<Self> {
        let local = match target {
            SocketAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
            SocketAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
        };
        let socket = UdpSocket::bind(local)?;
        Ok(Self { socket, target })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

impl DatagramChannel for TelemetrySocket {
    type Error = io::Error;

    fn send(&mut self, buf: &[u8]) -> nb::Result<usize, io::Error> {
        self.socket.send_to(buf, self.target).map_err(classify)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn test_classify() {
        let e = io::Error::new(io::ErrorKind::WouldBlock, "later");
        assert!(matches!(classify(e), nb::Error::WouldBlock));
        let e = io::Error::new(io::ErrorKind::Interrupted, "signal");
        assert!(matches!(classify(e), nb::Error::WouldBlock));
        let e = io::Error::new(io::ErrorKind::BrokenPipe, "gone");
        assert!(matches!(
            classify(e),
            nb::Error::Other(ref inner) if inner.kind() == io::ErrorKind::BrokenPipe
        ));
    }

    #[test]
    fn test_tcp_stream_channel() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let mut client = TcpStream::connect(listener.local_addr().unwrap()).unwrap();
        let (mut server, _) = listener.accept().unwrap();

        let written = StreamChannel::write(&mut client, b"abc").unwrap();
        assert_eq!(written, 3);
        let mut buf = [0u8; 3];
        let mut got = 0;
        while got < 3 {
            got += StreamChannel::read(&mut server, &mut buf[got..]).unwrap();
        }
        assert_eq!(&buf, b"abc");

        drop(client);
        assert_eq!(StreamChannel::read(&mut server, &mut buf).unwrap(), 0);
    }

    #[test]
    fn test_telemetry_socket_sends_datagram() {
        let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
        let target = receiver.local_addr().unwrap();
        let mut socket = TelemetrySocket::open(target).unwrap();
        assert_eq!(socket.target(), target);
        assert_eq!(socket.send(&[1, 2, 3, 4]).unwrap(), 4);

        let mut buf = [0u8; 16];
        let (n, _) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..n], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_std_timer_sleeps() {
        let start = std::time::Instant::now();
        StdTimer.delay(Duration::from_millis(5));
        assert!(start.elapsed() >= Duration::from_millis(5));
    }
}
