// src/readings/random.rs

use super::ReadingSource;
use crate::common::protocol::{MAX_AIR_QUALITY, MAX_HUMIDITY, MAX_TEMPERATURE};
use crate::common::TelemetryPayload;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform random readings within the generator ranges (all inclusive):
/// temperature `0..=60`, humidity `0..=70`, air quality `0..=100`.
#[derive(Debug, Clone)]
pub struct RandomReadings<R: Rng = ChaCha8Rng> {
    rng: R,
}

impl RandomReadings<ChaCha8Rng> {
    /// Deterministic sequence of readings for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> RandomReadings<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Draws one sample stamped with the current time.
    pub fn sample(&mut self) -> TelemetryPayload {
        TelemetryPayload::new(
            self.rng.gen_range(0..=MAX_TEMPERATURE),
            self.rng.gen_range(0..=MAX_HUMIDITY),
            self.rng.gen_range(0..=MAX_AIR_QUALITY),
        )
    }
}

impl<R: Rng> ReadingSource for RandomReadings<R> {
    fn next_payload(&mut self) -> Option<TelemetryPayload> {
        Some(self.sample())
    }
}
