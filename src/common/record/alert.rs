// src/common/record/alert.rs

use super::{read_u32_le, WireRecord, RESERVED_LEN};
use crate::common::SensorId;
use core::mem::size_of;

/// Message types carried in the first field of an [`AlertNotification`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u32)]
pub enum AlertKind {
    /// Client to server: a reading crossed a threshold.
    Alert = 0,
    /// Server to client: the alert was acknowledged, resume streaming.
    Reactivate = 1,
}

impl AlertKind {
    /// Tries to convert a raw wire value into an `AlertKind`.
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(AlertKind::Alert),
            1 => Some(AlertKind::Reactivate),
            _ => None,
        }
    }
}

/// Alert request and reactivation reply share this layout; only
/// `message_type` tells them apart.
///
/// The raw `message_type` is kept so that unknown values survive decoding and
/// can be reported by the handshake.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AlertNotification {
    pub message_type: u32,
    pub id: SensorId,
}

impl AlertNotification {
    pub const SIZE: usize = size_of::<u32>() + size_of::<u8>() + RESERVED_LEN;

    pub fn new(kind: AlertKind, id: SensorId) -> Self {
        Self { message_type: kind as u32, id }
    }

    pub fn alert(id: SensorId) -> Self {
        Self::new(AlertKind::Alert, id)
    }

    pub fn reactivate(id: SensorId) -> Self {
        Self::new(AlertKind::Reactivate, id)
    }

    pub fn kind(&self) -> Option<AlertKind> {
        AlertKind::from_u32(self.message_type)
    }
}

impl WireRecord for AlertNotification {
    const NAME: &'static str = "alert notification";
    const SIZE: usize = AlertNotification::SIZE;

    fn write_fields(&self, out: &mut [u8]) {
        out[..4].copy_from_slice(&self.message_type.to_le_bytes());
        out[4] = self.id.as_u8();
    }

    fn read_fields(bytes: &[u8]) -> Self {
        Self {
            message_type: read_u32_le(bytes, 0),
            id: SensorId::from(bytes[4]),
        }
    }
}
