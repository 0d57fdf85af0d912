// crates/epos-rs/src/od/payload.rs
//! Fixed-layout payloads of the ReadObject and WriteObject services.
//! All multi-byte fields are little-endian.

use crate::frame::ProtocolError;
use crate::types::{NodeId, ObjectAddress};

/// A trait for payloads that can be serialized into and deserialized from a byte buffer.
pub trait PayloadCodec: Sized {
    /// Exact size of the payload on the wire.
    const SIZE: usize;

    /// Serializes the payload into the start of `buffer`.
    /// Returns the number of bytes written.
    fn serialize(&self, buffer: &mut [u8]) -> Result<usize, ProtocolError>;

    /// Deserializes the payload from the start of `buffer`.
    fn deserialize(buffer: &[u8]) -> Result<Self, ProtocolError>;
}

fn address_from(buffer: &[u8]) -> ObjectAddress {
    ObjectAddress {
        index: u16::from_le_bytes([buffer[0], buffer[1]]),
        subindex: buffer[2],
        node_id: NodeId(buffer[3]),
    }
}

fn write_address(address: &ObjectAddress, buffer: &mut [u8]) {
    buffer[0..2].copy_from_slice(&address.index.to_le_bytes());
    buffer[2] = address.subindex;
    buffer[3] = address.node_id.0;
}

fn read_u32(buffer: &[u8]) -> u32 {
    u32::from_le_bytes([buffer[0], buffer[1], buffer[2], buffer[3]])
}

/// ReadObject request: index, subindex, node ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadObjectRequest {
    pub address: ObjectAddress,
}

impl PayloadCodec for ReadObjectRequest {
    const SIZE: usize = 4;

    fn serialize(&self, buffer: &mut [u8]) -> Result<usize, ProtocolError> {
        if buffer.len() < Self::SIZE {
            return Err(ProtocolError::BufferTooShort);
        }
        write_address(&self.address, buffer);
        Ok(Self::SIZE)
    }

    fn deserialize(buffer: &[u8]) -> Result<Self, ProtocolError> {
        if buffer.len() < Self::SIZE {
            return Err(ProtocolError::BufferTooShort);
        }
        Ok(Self {
            address: address_from(buffer),
        })
    }
}

/// ReadObject response: device status code followed by the object value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadObjectResponse {
    pub error_code: u32,
    pub value: u32,
}

impl PayloadCodec for ReadObjectResponse {
    const SIZE: usize = 8;

    fn serialize(&self, buffer: &mut [u8]) -> Result<usize, ProtocolError> {
        if buffer.len() < Self::SIZE {
            return Err(ProtocolError::BufferTooShort);
        }
        buffer[0..4].copy_from_slice(&self.error_code.to_le_bytes());
        buffer[4..8].copy_from_slice(&self.value.to_le_bytes());
        Ok(Self::SIZE)
    }

    fn deserialize(buffer: &[u8]) -> Result<Self, ProtocolError> {
        if buffer.len() < Self::SIZE {
            return Err(ProtocolError::BufferTooShort);
        }
        Ok(Self {
            error_code: read_u32(&buffer[0..4]),
            value: read_u32(&buffer[4..8]),
        })
    }
}

/// WriteObject request: index, subindex, node ID and the new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteObjectRequest {
    pub address: ObjectAddress,
    pub value: u32,
}

impl PayloadCodec for WriteObjectRequest {
    const SIZE: usize = 8;

    fn serialize(&self, buffer: &mut [u8]) -> Result<usize, ProtocolError> {
        if buffer.len() < Self::SIZE {
            return Err(ProtocolError::BufferTooShort);
        }
        write_address(&self.address, buffer);
        buffer[4..8].copy_from_slice(&self.value.to_le_bytes());
        Ok(Self::SIZE)
    }

    fn deserialize(buffer: &[u8]) -> Result<Self, ProtocolError> {
        if buffer.len() < Self::SIZE {
            return Err(ProtocolError::BufferTooShort);
        }
        Ok(Self {
            address: address_from(buffer),
            value: read_u32(&buffer[4..8]),
        })
    }
}

/// WriteObject response: device status code only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteObjectResponse {
    pub error_code: u32,
}

impl PayloadCodec for WriteObjectResponse {
    const SIZE: usize = 4;

    fn serialize(&self, buffer: &mut [u8]) -> Result<usize, ProtocolError> {
        if buffer.len() < Self::SIZE {
            return Err(ProtocolError::BufferTooShort);
        }
        buffer[0..4].copy_from_slice(&self.error_code.to_le_bytes());
        Ok(Self::SIZE)
    }

    fn deserialize(buffer: &[u8]) -> Result<Self, ProtocolError> {
        if buffer.len() < Self::SIZE {
            return Err(ProtocolError::BufferTooShort);
        }
        Ok(Self {
            error_code: read_u32(&buffer[0..4]),
        })
    }
}
