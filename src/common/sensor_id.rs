// src/common/sensor_id.rs

use super::error::SensorError;
use core::convert::TryFrom;
use core::fmt;

/// Identifier of one sensor node, validated once at startup.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct SensorId(u8);

impl SensorId {
    pub const MIN: i64 = u8::MIN as i64;
    pub const MAX: i64 = u8::MAX as i64;

    /// Creates a `SensorId` from a raw command-line value.
    pub fn new(raw: i64) -> Result<Self, SensorError> {
        u8::try_from(raw)
            .map(SensorId)
            .map_err(|_| SensorError::Configuration(format!(
                "ID MUST BE BETWEEN {} AND {} (got {raw})",
                Self::MIN,
                Self::MAX
            )))
    }

    #[inline]
    pub const fn as_u8(&self) -> u8 {
        self.0
    }
}

impl From<u8> for SensorId {
    fn from(value: u8) -> Self {
        SensorId(value)
    }
}

impl TryFrom<i64> for SensorId {
    type Error = SensorError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SensorId> for u8 {
    fn from(value: SensorId) -> Self {
        value.0
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
