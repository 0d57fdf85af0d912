// crates/epos-rs/src/frame/variant.rs
use super::crc;
use super::error::ProtocolError;
use core::fmt;

/// Selects the wire format spoken by the connected firmware.
///
/// The two formats differ in the meaning of the length field and in the
/// checksum algorithm; a session must stick to one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProtocolVariant {
    /// Length field counts 16-bit words minus one. Payload words are
    /// checksummed high byte first with CRC-16/CCITT (0x1021).
    #[default]
    Epos,
    /// Length field counts bytes minus one. Bytes are checksummed in
    /// natural order with the reflected table CRC (0x8408).
    Epos2,
}

impl ProtocolVariant {
    /// Largest payload, in bytes, a single frame can carry.
    pub const fn max_payload_len(self) -> usize {
        match self {
            // 255 words
            Self::Epos => 510,
            Self::Epos2 => 256,
        }
    }

    /// Computes the wire length field for a payload of `payload_len` bytes.
    pub fn length_field(self, payload_len: usize) -> Result<u8, ProtocolError> {
        if payload_len == 0 || payload_len > self.max_payload_len() {
            return Err(ProtocolError::InvalidPayloadLength(payload_len));
        }
        match self {
            Self::Epos => {
                if payload_len % 2 != 0 {
                    return Err(ProtocolError::InvalidPayloadLength(payload_len));
                }
                Ok((payload_len / 2 - 1) as u8)
            }
            Self::Epos2 => Ok((payload_len - 1) as u8),
        }
    }

    /// Inverse of [`length_field`](Self::length_field): the payload size in
    /// bytes announced by a received length field.
    pub const fn payload_len(self, length_field: u8) -> usize {
        match self {
            Self::Epos => (length_field as usize + 1) * 2,
            Self::Epos2 => length_field as usize + 1,
        }
    }

    /// Computes the frame checksum over `opcode ‖ length_field ‖ payload`.
    pub fn checksum(self, opcode: u8, length_field: u8, payload: &[u8]) -> u16 {
        match self {
            Self::Epos => {
                let header = crc::crc_byte(crc::crc_byte(0, opcode), length_field);
                crc::compute_words(header, payload)
            }
            Self::Epos2 => {
                let header = crc::compute_reflected(0, &[opcode, length_field]);
                crc::compute_reflected(header, payload)
            }
        }
    }
}

impl fmt::Display for ProtocolVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Epos => write!(f, "epos"),
            Self::Epos2 => write!(f, "epos2"),
        }
    }
}
