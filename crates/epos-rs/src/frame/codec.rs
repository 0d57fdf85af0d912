// crates/epos-rs/src/frame/codec.rs
use super::{Ack, Frame, ProtocolError, ProtocolVariant};
use crate::config::DriverConfig;
use crate::hal::Transport;
use crate::log::{diag_trace, diag_warn};
use crate::types::Opcode;
use alloc::vec;
use alloc::vec::Vec;
use core::time::Duration;

/// Serializes a frame into its wire bytes: `opcode ‖ length ‖ payload ‖ crc_lo ‖ crc_hi`.
///
/// The acknowledgement bytes are not part of the result; they are exchanged
/// by [`FrameCodec::send_frame`] and [`FrameCodec::recv_frame`] between the
/// individual fields.
pub fn encode_frame(variant: ProtocolVariant, frame: &Frame) -> Result<Vec<u8>, ProtocolError> {
    let length_field = frame.length_field(variant)?;
    let crc = variant.checksum(frame.opcode, length_field, &frame.payload);

    let mut buffer = Vec::with_capacity(frame.payload.len() + 4);
    buffer.push(frame.opcode);
    buffer.push(length_field);
    buffer.extend_from_slice(&frame.payload);
    buffer.extend_from_slice(&crc.to_le_bytes());
    Ok(buffer)
}

/// Drives the two-phase acknowledgement handshake for single frames.
///
/// A codec holds no per-exchange state; every call runs one exchange to
/// completion or failure and nothing is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCodec {
    variant: ProtocolVariant,
    timeout: Duration,
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new(&DriverConfig::default())
    }
}

impl FrameCodec {
    pub fn new(config: &DriverConfig) -> Self {
        Self {
            variant: config.variant,
            timeout: config.timeout,
        }
    }

    pub fn variant(&self) -> ProtocolVariant {
        self.variant
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends one request frame and waits for the device to accept it.
    ///
    /// The payload length is validated before the opcode goes out, so an
    /// invalid payload never touches the wire.
    pub fn send_frame<T: Transport + ?Sized>(
        &self,
        transport: &mut T,
        opcode: u8,
        payload: &[u8],
    ) -> Result<(), ProtocolError> {
        let length_field = self.variant.length_field(payload.len())?;

        // 1. Opcode, then wait for the device to signal it can take the payload.
        transport.write_exact(&[opcode])?;
        let ready = self.read_byte(transport)?;
        match Ack::try_from(ready)? {
            Ack::Okay => {}
            Ack::Fail => return Err(ProtocolError::DeviceNotReady),
        }

        // 2. Length, payload and checksum.
        transport.write_exact(&[length_field])?;
        transport.write_exact(payload)?;
        let crc = self.variant.checksum(opcode, length_field, payload);
        transport.write_exact(&crc.to_le_bytes())?;
        diag_trace!(
            "Sent frame opcode={:#04x} len={} crc={:#06x}",
            opcode,
            payload.len(),
            crc
        );

        // 3. End ack confirms the device's checksum matched.
        let end = self.read_byte(transport)?;
        if end != u8::from(Ack::Okay) {
            diag_warn!("Device rejected frame opcode={:#04x} (end ack {:#04x})", opcode, end);
            return Err(ProtocolError::DeviceRejectedFrame(end));
        }
        Ok(())
    }

    /// Receives one response frame carrying exactly `expected_payload_len` bytes.
    ///
    /// On a checksum mismatch the device is told so with a FAIL end ack before
    /// the error is returned. A length mismatch abandons the exchange without
    /// any further ack.
    pub fn recv_frame<T: Transport + ?Sized>(
        &self,
        transport: &mut T,
        expected_payload_len: usize,
    ) -> Result<Vec<u8>, ProtocolError> {
        let expected_length_field = self.variant.length_field(expected_payload_len)?;

        let opcode = self.read_byte(transport)?;
        if opcode != u8::from(Opcode::Response) {
            return Err(ProtocolError::UnexpectedOpcode(opcode));
        }
        transport.write_exact(&[u8::from(Ack::Okay)])?;

        let length_field = self.read_byte(transport)?;
        if length_field != expected_length_field {
            return Err(ProtocolError::LengthMismatch {
                expected: expected_length_field,
                actual: length_field,
            });
        }

        let mut payload = vec![0u8; expected_payload_len];
        transport.read_exact(&mut payload, self.timeout)?;
        let mut crc_bytes = [0u8; 2];
        transport.read_exact(&mut crc_bytes, self.timeout)?;

        let received = u16::from_le_bytes(crc_bytes);
        let computed = self.variant.checksum(opcode, length_field, &payload);
        if received != computed {
            diag_warn!(
                "Checksum mismatch on response: computed {:#06x}, received {:#06x}",
                computed,
                received
            );
            transport.write_exact(&[u8::from(Ack::Fail)])?;
            return Err(ProtocolError::ChecksumMismatch { computed, received });
        }

        transport.write_exact(&[u8::from(Ack::Okay)])?;
        diag_trace!("Received response frame len={} crc={:#06x}", payload.len(), received);
        Ok(payload)
    }

    fn read_byte<T: Transport + ?Sized>(&self, transport: &mut T) -> Result<u8, ProtocolError> {
        let mut byte = [0u8; 1];
        transport.read_exact(&mut byte, self.timeout)?;
        Ok(byte[0])
    }
}
