//! Defines the structures and logic for the EPOS serial frame layer.

pub mod crc;
pub mod codec;
pub mod error;
pub mod variant;

pub use codec::{FrameCodec, encode_frame};
pub use error::ProtocolError;
pub use variant::ProtocolVariant;

use crate::types::Opcode;
use alloc::vec::Vec;
use core::convert::TryFrom;

/// Handshake token exchanged before the payload (flow control) and after
/// the checksum (integrity).
///
/// The same two bytes serve both phases: `Okay` means READY before the
/// payload and OK after the checksum, `Fail` means NOT_READY and FAIL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Ack {
    Okay = b'O',
    Fail = b'F',
}

impl TryFrom<u8> for Ack {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            b'O' => Ok(Ack::Okay),
            b'F' => Ok(Ack::Fail),
            _ => Err(ProtocolError::UnexpectedAck(value)),
        }
    }
}

impl From<Ack> for u8 {
    fn from(ack: Ack) -> Self {
        ack as u8
    }
}

/// One frame as it travels between the acknowledgement exchanges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub opcode: u8,
    pub payload: Vec<u8>,
}

impl Frame {
    pub fn new(opcode: impl Into<u8>, payload: Vec<u8>) -> Self {
        Self {
            opcode: opcode.into(),
            payload,
        }
    }

    /// Builds a device response frame.
    pub fn response(payload: Vec<u8>) -> Self {
        Self::new(Opcode::Response, payload)
    }

    /// Returns the opcode as a known [`Opcode`], if it is one.
    pub fn kind(&self) -> Option<Opcode> {
        Opcode::try_from(self.opcode).ok()
    }

    /// Wire length field for this frame's payload.
    pub fn length_field(&self, variant: ProtocolVariant) -> Result<u8, ProtocolError> {
        variant.length_field(self.payload.len())
    }

    /// Checksum that accompanies this frame on the wire.
    pub fn checksum(&self, variant: ProtocolVariant) -> Result<u16, ProtocolError> {
        let length_field = self.length_field(variant)?;
        Ok(variant.checksum(self.opcode, length_field, &self.payload))
    }
}
