// src/client/alert.rs

use super::io_helpers::{recv_record, send_record};
use crate::common::{
    error::SensorError, AlertKind, AlertNotification, ProtocolViolation, Result, SensorId,
    StreamChannel,
};
use std::net::{SocketAddr, TcpStream};

/// Sends ALERT and blocks until the reply arrives, then checks it is REACTIVATE.
///
/// Only the message type of the reply is checked. Its id is not compared
/// with ours and its padding is ignored. There is no timeout.
pub fn alert_over<C: StreamChannel>(
    channel: &mut C,
    id: SensorId,
) -> core::result::Result<AlertNotification, SensorError<C::Error>> {
    send_record(channel, &AlertNotification::alert(id))?;
    log::debug!("alert sent for sensor {id}, awaiting reactivation");

    let reply: AlertNotification = recv_record(channel)?;
    match reply.kind() {
        Some(AlertKind::Reactivate) => {
            if reply.id != id {
                log::warn!("reactivation addressed to sensor {}, accepting for {id}", reply.id);
            }
            Ok(reply)
        }
        _ => Err(ProtocolViolation::UnexpectedAlertResponse {
            message_type: reply.message_type,
        }
        .into()),
    }
}

/// Alert handshake on a fresh connection to the alert port.
///
/// Blocking: the caller's telemetry loop is suspended for the whole exchange,
/// so at most one alert is ever in flight. The stream is closed on every exit path.
pub fn send_alert_and_await_reactivation(id: SensorId, addr: SocketAddr) -> Result<()> {
    let mut stream = TcpStream::connect(addr).map_err(|source| SensorError::Connection {
        channel: "alert",
        addr,
        source,
    })?;
    alert_over(&mut stream, id)?;
    log::info!("sensor {id} reactivated by {addr}");
    Ok(())
}
