// src/client/telemetry.rs

use super::{send_alert_and_await_reactivation, ClientState, RunSummary, SensorClient};
use crate::common::{
    error::SensorError, DatagramChannel, Result, TelemetryPayload, Timer, WireRecord,
};
use crate::readings::ReadingSource;
use std::io;

/// Sends one payload as a single datagram. Fire-and-forget: no ack, no retry.
///
/// A datagram shorter than the encoded payload is a fatal local condition.
pub fn send_payload<D: DatagramChannel>(
    socket: &mut D,
    payload: &TelemetryPayload,
) -> core::result::Result<(), SensorError<D::Error>> {
    let encoded = payload.encode();
    let sent = nb::block!(socket.send(&encoded)).map_err(SensorError::Io)?;
    if sent != encoded.len() {
        return Err(SensorError::DatagramTruncated {
            sent,
            expected: encoded.len(),
        });
    }
    Ok(())
}

impl<S, T> SensorClient<S, T>
where
    S: ReadingSource,
    T: Timer,
{
    /// The steady-state loop: generate, evaluate, (alert), send, sleep.
    pub(super) fn stream<D>(&mut self, socket: &mut D) -> Result<RunSummary>
    where
        D: DatagramChannel<Error = io::Error>,
    {
        while !self.budget_spent() {
            let Some(payload) = self.source.next_payload() else {
                log::info!("reading source exhausted after {} cycles", self.summary.cycles);
                break;
            };
            self.run_cycle(socket, &payload)?;
            if !self.budget_spent() {
                self.timer.delay(self.config.tick);
            }
        }
        Ok(self.summary)
    }

    fn run_cycle<D>(&mut self, socket: &mut D, payload: &TelemetryPayload) -> Result<()>
    where
        D: DatagramChannel<Error = io::Error>,
    {
        if payload.should_alert() {
            self.escalate()?;
        }
        send_payload(socket, payload)?;
        println!("{}", payload.report(self.identity.id));
        self.summary.cycles += 1;
        Ok(())
    }

    /// Blocks the loop for the whole alert handshake. No payload goes out
    /// meanwhile, so only one alert can ever be outstanding.
    fn escalate(&mut self) -> Result<()> {
        println!("ALERT");
        self.transition(ClientState::Alerting);
        send_alert_and_await_reactivation(self.identity.id, self.config.endpoints.alert())?;
        self.summary.alerts += 1;
        self.transition(ClientState::Streaming);
        Ok(())
    }

    fn budget_spent(&self) -> bool {
        self.config
            .max_cycles
            .is_some_and(|max| self.summary.cycles >= max)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::RecordingTimer;
    use super::*;
    use crate::common::SensorId;
    use crate::config::ClientConfig;
    use crate::readings::ScriptedReadings;
    use std::net::Ipv4Addr;

    /// Datagram channel that caps how much of each datagram goes out.
    #[derive(Default)]
    struct MockDatagram {
        truncate_to: Option<usize>,
        would_block: usize,
        sent: Vec<Vec<u8>>,
    }

    impl DatagramChannel for MockDatagram {
        type Error = io::Error;

        fn send(&mut self, buf: &[u8]) -> nb::Result<usize, io::Error> {
            if self.would_block > 0 {
                self.would_block -= 1;
                return Err(nb::Error::WouldBlock);
            }
            let n = self.truncate_to.map_or(buf.len(), |cap| cap.min(buf.len()));
            self.sent.push(buf[..n].to_vec());
            Ok(n)
        }
    }

    fn streaming_client(
        payloads: Vec<TelemetryPayload>,
    ) -> SensorClient<ScriptedReadings, RecordingTimer> {
        let config = ClientConfig::new(SensorId::from(7), Ipv4Addr::LOCALHOST);
        let mut client =
            SensorClient::new(config, ScriptedReadings::new(payloads), RecordingTimer::default());
        client.state = ClientState::Streaming;
        client
    }

    #[test]
    fn test_send_payload_single_datagram() {
        let mut socket = MockDatagram { would_block: 2, ..Default::default() };
        let payload = TelemetryPayload::at(1_700_000_000, 25, 40, 50);
        send_payload(&mut socket, &payload).unwrap();
        assert_eq!(socket.sent.len(), 1);
        assert_eq!(socket.sent[0].len(), 11);
        assert_eq!(socket.sent[0][0], 0x00);
        assert_eq!(socket.sent[0][8], 25);
    }

    #[test]
    fn test_send_payload_truncated() {
        let mut socket = MockDatagram { truncate_to: Some(8), ..Default::default() };
        let result = send_payload(&mut socket, &TelemetryPayload::at(1, 2, 3, 40));
        assert!(matches!(
            result,
            Err(SensorError::DatagramTruncated { sent: 8, expected: 11 })
        ));
    }

    #[test]
    fn test_stream_sends_in_generation_order() {
        let payloads: Vec<_> = (0..4).map(|ts| TelemetryPayload::at(ts, 20, 30, 40)).collect();
        let mut client = streaming_client(payloads.clone());
        let mut socket = MockDatagram::default();

        let summary = client.stream(&mut socket).unwrap();
        assert_eq!(summary, RunSummary { cycles: 4, alerts: 0 });
        let decoded: Vec<_> = socket
            .sent
            .iter()
            .map(|raw| TelemetryPayload::decode(raw).unwrap())
            .collect();
        assert_eq!(decoded, payloads);
        assert_eq!(client.timer.delays, vec![client.config.tick; 4]);
    }

    #[test]
    fn test_stream_stops_on_truncated_datagram() {
        let payloads = vec![TelemetryPayload::at(0, 20, 30, 40); 3];
        let mut client = streaming_client(payloads);
        let mut socket = MockDatagram { truncate_to: Some(10), ..Default::default() };

        assert!(matches!(
            client.stream(&mut socket),
            Err(SensorError::DatagramTruncated { sent: 10, expected: 11 })
        ));
        // Terminates on the first cycle; nothing further is attempted.
        assert_eq!(socket.sent.len(), 1);
        assert_eq!(client.summary.cycles, 0);
        assert!(client.timer.delays.is_empty());
    }

    #[test]
    fn test_budget() {
        let mut client = streaming_client(Vec::new());
        assert!(!client.budget_spent());
        client.config.max_cycles = Some(0);
        assert!(client.budget_spent());
        client.config.max_cycles = Some(2);
        client.summary.cycles = 1;
        assert!(!client.budget_spent());
        client.summary.cycles = 2;
        assert!(client.budget_spent());
    }
}
