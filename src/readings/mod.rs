// src/readings/mod.rs

// Value generation for the telemetry loop. A real node would sample
// hardware here; this client ships a bounded random generator and a
// scripted source for replay and tests.

mod random;
mod scripted;

pub use random::RandomReadings;
pub use scripted::ScriptedReadings;

use crate::common::TelemetryPayload;

/// Produces the payload for each telemetry cycle.
pub trait ReadingSource {
    /// Next sample, or `None` once the source is exhausted (ends the stream).
    fn next_payload(&mut self) -> Option<TelemetryPayload>;
}

impl<S: ReadingSource + ?Sized> ReadingSource for Box<S> {
    fn next_payload(&mut self) -> Option<TelemetryPayload> {
        (**self).next_payload()
    }
}
