// src/client/mod.rs

pub mod alert;
pub mod io_helpers;
pub mod registration;
pub mod telemetry;

pub use alert::send_alert_and_await_reactivation;
pub use io_helpers::{recv_exact, send_exact};
pub use registration::register;
pub use telemetry::send_payload;

use crate::common::{error::SensorError, Result, SensorIdentity, StdTimer, TelemetrySocket, Timer};
use crate::config::ClientConfig;
use crate::readings::ReadingSource;

/// Lifecycle of a sensor client process.
///
/// `Starting -> Registered -> Streaming <-> Alerting`, and any state may end
/// in `Terminated`. There is no way back to `Starting`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ClientState {
    Starting,
    Registered,
    Streaming,
    Alerting,
    Terminated,
}

impl ClientState {
    pub fn can_enter(self, next: ClientState) -> bool {
        use ClientState::*;
        matches!(
            (self, next),
            (Starting, Registered)
                | (Registered, Streaming)
                | (Streaming, Alerting)
                | (Alerting, Streaming)
                | (Starting | Registered | Streaming | Alerting, Terminated)
        )
    }
}

/// Counters reported when the stream ends on purpose.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct RunSummary {
    pub cycles: u64,
    pub alerts: u64,
}

/// Drives one sensor through registration and the telemetry loop.
#[derive(Debug)]
pub struct SensorClient<S, T = StdTimer>
where
    S: ReadingSource,
    T: Timer,
{
    config: ClientConfig,
    identity: SensorIdentity,
    state: ClientState,
    source: S,
    timer: T,
    summary: RunSummary,
}

impl<S, T> SensorClient<S, T>
where
    S: ReadingSource,
    T: Timer,
{
    pub fn new(config: ClientConfig, source: S, timer: T) -> Self {
        SensorClient {
            identity: SensorIdentity::new(config.sensor_id),
            config,
            state: ClientState::Starting,
            source,
            timer,
            summary: RunSummary::default(),
        }
    }

    pub fn state(&self) -> ClientState {
        self.state
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Registers once, then streams until the source is exhausted, the cycle
    /// budget is spent, or a fatal error occurs. Always ends in `Terminated`.
    pub fn run(&mut self) -> Result<RunSummary> {
        let result = self.run_to_completion();
        if let Err(e) = &result {
            log::debug!("client terminating on error: {e}");
        }
        self.transition(ClientState::Terminated);
        result
    }

    fn run_to_completion(&mut self) -> Result<RunSummary> {
        if self.state != ClientState::Starting {
            return Err(SensorError::AlreadyRun);
        }

        register(&self.identity, self.config.endpoints.registration())?;
        println!("Registration complete");
        self.transition(ClientState::Registered);

        println!("Starting to send payloads...");
        let mut socket =
            TelemetrySocket::open(self.config.endpoints.telemetry()).map_err(SensorError::Io)?;
        log::debug!("streaming telemetry to {}", socket.target());
        self.transition(ClientState::Streaming);

        // The socket is dropped (closed) when this returns, on every path.
        self.stream(&mut socket)
    }

    fn transition(&mut self, next: ClientState) {
        debug_assert!(
            self.state.can_enter(next) || self.state == next,
            "illegal transition {:?} -> {next:?}",
            self.state
        );
        if self.state != next {
            log::debug!("client state {:?} -> {next:?}", self.state);
            self.state = next;
        }
    }
}
