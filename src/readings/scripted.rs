// src/readings/scripted.rs

use super::ReadingSource;
use crate::common::TelemetryPayload;
use std::collections::VecDeque;

/// Replays a fixed list of payloads, then reports exhaustion.
#[derive(Debug, Clone, Default)]
pub struct ScriptedReadings {
    queue: VecDeque<TelemetryPayload>,
}

impl ScriptedReadings {
    pub fn new<I: IntoIterator<Item = TelemetryPayload>>(payloads: I) -> Self {
        Self { queue: payloads.into_iter().collect() }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl ReadingSource for ScriptedReadings {
    fn next_payload(&mut self) -> Option<TelemetryPayload> {
        self.queue.pop_front()
    }
}
