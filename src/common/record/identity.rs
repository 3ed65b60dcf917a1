// src/common/record/identity.rs

use super::{WireRecord, RESERVED_LEN};
use crate::common::SensorId;
use core::mem::size_of;

/// Sent once on the registration channel to announce a sensor.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SensorIdentity {
    pub id: SensorId,
}

impl SensorIdentity {
    pub const SIZE: usize = size_of::<u8>() + RESERVED_LEN;

    pub fn new(id: SensorId) -> Self {
        Self { id }
    }
}

impl WireRecord for SensorIdentity {
    const NAME: &'static str = "sensor identity";
    const SIZE: usize = SensorIdentity::SIZE;

    fn write_fields(&self, out: &mut [u8]) {
        out[0] = self.id.as_u8();
        // out[1..17] stays zero
    }

    fn read_fields(bytes: &[u8]) -> Self {
        Self { id: SensorId::from(bytes[0]) }
    }
}
