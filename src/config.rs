// src/config.rs

//! Command-line surface and the validated client configuration.
//!
//! Two required positionals (sensor id, server IPv4 address). The optional
//! flags default to the protocol constants, so a plain invocation behaves
//! exactly like the fixed protocol. Validation never touches the network.

use crate::common::{
    protocol::{ALERT_PORT, REGISTRATION_PORT, TELEMETRY_PORT, TICK},
    error::SensorError,
    SensorId,
};
use clap::Parser;
use core::time::Duration;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

/// Sensor client: registers with the server, streams telemetry, escalates alerts.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Sensor ID (0-255)
    #[arg(allow_negative_numbers = true)]
    pub sensor_id: i64,

    /// Server IPv4 address (dotted decimal)
    pub server_ip: String,

    /// TCP port for registration
    #[arg(long, default_value_t = REGISTRATION_PORT)]
    pub registration_port: u16,

    /// UDP port for telemetry payloads
    #[arg(long, default_value_t = TELEMETRY_PORT)]
    pub telemetry_port: u16,

    /// TCP port for alerts
    #[arg(long, default_value_t = ALERT_PORT)]
    pub alert_port: u16,

    /// Interval between payloads, in milliseconds
    #[arg(long, default_value_t = TICK.as_millis() as u64)]
    pub tick_ms: u64,

    /// Stop after this many telemetry cycles (default: run until a fatal error)
    #[arg(long)]
    pub cycles: Option<u64>,

    /// Seed for the random reading generator
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Where the three protocol channels live. All share one host.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Endpoints {
    pub host: Ipv4Addr,
    pub registration_port: u16,
    pub telemetry_port: u16,
    pub alert_port: u16,
}

impl Endpoints {
    /// The fixed protocol ports on `host`.
    pub fn new(host: Ipv4Addr) -> Self {
        Self {
            host,
            registration_port: REGISTRATION_PORT,
            telemetry_port: TELEMETRY_PORT,
            alert_port: ALERT_PORT,
        }
    }

    fn on(&self, port: u16) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.host, port))
    }

    pub fn registration(&self) -> SocketAddr {
        self.on(self.registration_port)
    }

    pub fn telemetry(&self) -> SocketAddr {
        self.on(self.telemetry_port)
    }

    pub fn alert(&self) -> SocketAddr {
        self.on(self.alert_port)
    }
}

/// Validated, immutable configuration for one client process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub sensor_id: SensorId,
    pub endpoints: Endpoints,
    pub tick: Duration,
    pub max_cycles: Option<u64>,
    pub seed: Option<u64>,
}

impl ClientConfig {
    /// Default configuration for `sensor_id` talking to `host` on the protocol ports.
    pub fn new(sensor_id: SensorId, host: Ipv4Addr) -> Self {
        Self {
            sensor_id,
            endpoints: Endpoints::new(host),
            tick: TICK,
            max_cycles: None,
            seed: None,
        }
    }
}

impl TryFrom<Args> for ClientConfig {
    type Error = SensorError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let sensor_id = SensorId::new(args.sensor_id)?;
        let host: Ipv4Addr = args.server_ip.parse().map_err(|_| {
            SensorError::Configuration(format!("invalid server IPv4 address '{}'", args.server_ip))
        })?;

        Ok(Self {
            sensor_id,
            endpoints: Endpoints {
                host,
                registration_port: args.registration_port,
                telemetry_port: args.telemetry_port,
                alert_port: args.alert_port,
            },
            tick: Duration::from_millis(args.tick_ms),
            max_cycles: args.cycles,
            seed: args.seed,
        })
    }
}
