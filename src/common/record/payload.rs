// src/common/record/payload.rs

use super::{read_u64_le, WireRecord};
use crate::common::protocol::{MAX_ALERT_HUMIDITY, MAX_ALERT_TEMPERATURE, MIN_ALERT_AIR_QUALITY};
use crate::common::SensorId;
use chrono::{Local, TimeZone, Utc};
use core::fmt;
use core::mem::size_of;

/// One telemetry sample, sent as a single datagram.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TelemetryPayload {
    /// Unix epoch seconds at which the sample was taken.
    pub timestamp: u64,
    pub temperature: u8,
    pub humidity: u8,
    pub air_quality: u8,
}

impl TelemetryPayload {
    pub const SIZE: usize = size_of::<u64>() + 3 * size_of::<u8>();

    /// Builds a payload stamped with the current time.
    pub fn new(temperature: u8, humidity: u8, air_quality: u8) -> Self {
        let timestamp = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
        Self::at(timestamp, temperature, humidity, air_quality)
    }

    pub const fn at(timestamp: u64, temperature: u8, humidity: u8, air_quality: u8) -> Self {
        Self { timestamp, temperature, humidity, air_quality }
    }

    /// True iff any reading strictly crosses its alert threshold.
    pub fn should_alert(&self) -> bool {
        self.temperature > MAX_ALERT_TEMPERATURE
            || self.humidity > MAX_ALERT_HUMIDITY
            || self.air_quality < MIN_ALERT_AIR_QUALITY
    }

    /// Console form of the payload, tagged with the reporting sensor.
    pub fn report(&self, id: SensorId) -> PayloadReport<'_> {
        PayloadReport { id, payload: self }
    }
}

impl WireRecord for TelemetryPayload {
    const NAME: &'static str = "telemetry payload";
    const SIZE: usize = TelemetryPayload::SIZE;

    fn write_fields(&self, out: &mut [u8]) {
        out[..8].copy_from_slice(&self.timestamp.to_le_bytes());
        out[8] = self.temperature;
        out[9] = self.humidity;
        out[10] = self.air_quality;
    }

    fn read_fields(bytes: &[u8]) -> Self {
        Self {
            timestamp: read_u64_le(bytes, 0),
            temperature: bytes[8],
            humidity: bytes[9],
            air_quality: bytes[10],
        }
    }
}

/// `"{id} at {local time}: {t} C {h} H {aq} %"`
pub struct PayloadReport<'a> {
    id: SensorId,
    payload: &'a TelemetryPayload,
}

impl fmt::Display for PayloadReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.payload;
        write!(f, "{} at ", self.id)?;
        match i64::try_from(p.timestamp)
            .ok()
            .and_then(|secs| Local.timestamp_opt(secs, 0).single())
        {
            Some(time) => write!(f, "{}", time.format("%Y-%m-%d %H:%M:%S"))?,
            None => write!(f, "{}", p.timestamp)?,
        }
        write!(f, ": {} C {} H {} %", p.temperature, p.humidity, p.air_quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_layout() {
        let payload = TelemetryPayload::at(1_700_000_000, 25, 40, 50);
        let encoded = payload.encode();
        assert_eq!(encoded.len(), 11);
        // 1_700_000_000 == 0x6553_F100
        assert_eq!(&encoded[..8], &[0x00, 0xF1, 0x53, 0x65, 0, 0, 0, 0]);
        assert_eq!(encoded[8], 25);
        assert_eq!(encoded[9], 40);
        assert_eq!(encoded[10], 50);
    }

    #[test]
    fn test_payload_round_trip() {
        let samples = [
            TelemetryPayload::at(0, 0, 0, 0),
            TelemetryPayload::at(1_700_000_000, 25, 40, 50),
            TelemetryPayload::at(u64::MAX, 255, 255, 255),
        ];
        for payload in samples {
            assert_eq!(TelemetryPayload::decode(&payload.encode()), Ok(payload));
        }
    }

    #[test]
    fn test_should_alert_nominal() {
        assert!(!TelemetryPayload::at(1_700_000_000, 25, 40, 50).should_alert());
    }

    #[test]
    fn test_should_alert_boundaries_do_not_trigger() {
        assert!(!TelemetryPayload::at(0, 50, 60, 10).should_alert());
    }

    #[test]
    fn test_should_alert_each_threshold() {
        assert!(TelemetryPayload::at(0, 51, 60, 10).should_alert());
        assert!(TelemetryPayload::at(0, 55, 40, 50).should_alert());
        assert!(TelemetryPayload::at(0, 50, 61, 10).should_alert());
        assert!(TelemetryPayload::at(0, 50, 60, 9).should_alert());
        assert!(TelemetryPayload::at(0, 0, 0, 0).should_alert());
    }

    #[test]
    fn test_new_stamps_current_time() {
        let before = Utc::now().timestamp() as u64;
        let payload = TelemetryPayload::new(1, 2, 3);
        let after = Utc::now().timestamp() as u64;
        assert!(payload.timestamp >= before && payload.timestamp <= after);
        assert_eq!((payload.temperature, payload.humidity, payload.air_quality), (1, 2, 3));
    }

    #[test]
    fn test_report_format() {
        let payload = TelemetryPayload::at(1_700_000_000, 25, 40, 50);
        let line = payload.report(SensorId::from(7)).to_string();
        assert!(line.starts_with("7 at "));
        assert!(line.ends_with(": 25 C 40 H 50 %"));
    }
}
