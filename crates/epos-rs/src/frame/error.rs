use crate::hal::TransportError;
use core::fmt;

/// Failures detected while driving the frame handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// The byte channel failed to deliver or accept the requested bytes.
    Transport(TransportError),
    /// The device answered the opcode with a NOT_READY token.
    DeviceNotReady,
    /// The device answered the opcode with neither READY nor NOT_READY.
    UnexpectedAck(u8),
    /// The device did not acknowledge the checksum of a sent frame.
    DeviceRejectedFrame(u8),
    /// A response frame started with something other than the response opcode.
    UnexpectedOpcode(u8),
    /// A response frame announced a different length than expected.
    LengthMismatch { expected: u8, actual: u8 },
    /// The received checksum does not match the locally computed one.
    ChecksumMismatch { computed: u16, received: u16 },
    /// The payload length cannot be expressed in the selected wire format.
    InvalidPayloadLength(usize),
    /// The provided buffer is too small for the operation.
    BufferTooShort,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "Transport error: {}", e),
            Self::DeviceNotReady => write!(f, "Device not ready to receive"),
            Self::UnexpectedAck(v) => write!(f, "Unrecognized ack received: {v:#04x}"),
            Self::DeviceRejectedFrame(v) => {
                write!(f, "Device acknowledged error in reception (end ack {v:#04x})")
            }
            Self::UnexpectedOpcode(v) => write!(f, "Invalid (non-null) response opcode: {v:#04x}"),
            Self::LengthMismatch { expected, actual } => write!(
                f,
                "Invalid response length field: expected {expected}, received {actual}"
            ),
            Self::ChecksumMismatch { computed, received } => write!(
                f,
                "Invalid message crc: computed {computed:#06x}, received {received:#06x}"
            ),
            Self::InvalidPayloadLength(len) => {
                write!(f, "Payload length {len} is not valid for this protocol variant")
            }
            Self::BufferTooShort => write!(f, "Buffer is too short for the payload"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}

// --- From Implementations for Error Conversion ---

impl From<TransportError> for ProtocolError {
    fn from(err: TransportError) -> Self {
        ProtocolError::Transport(err)
    }
}

impl ProtocolError {
    /// Returns true if the exchange failed because a read timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(TransportError::Timeout))
    }
}
