use core::convert::TryFrom;
use core::fmt;
use core::time::Duration;

// --- Protocol Constants ---

/// Per-read timeout the device firmware expects the host link to honour (100 ms).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(100);

/// Node ID that addresses whichever device answers first on the link.
pub const NODE_ID_ANY: NodeId = NodeId(0);

/// Represents an EPOS Node ID, wrapping a `u8` to ensure type safety.
///
/// The serial protocol carries the node ID as a plain byte so every value is
/// accepted; `0` addresses the directly connected device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NodeId(pub u8);

impl From<u8> for NodeId {
    fn from(value: u8) -> Self {
        NodeId(value)
    }
}

impl From<NodeId> for u8 {
    /// Converts a `NodeId` back into its underlying `u8` representation.
    fn from(node_id: NodeId) -> Self {
        node_id.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a single register in the device's object dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectAddress {
    pub index: u16,
    pub subindex: u8,
    pub node_id: NodeId,
}

impl ObjectAddress {
    pub const fn new(index: u16, subindex: u8, node_id: NodeId) -> Self {
        Self {
            index,
            subindex,
            node_id,
        }
    }
}

impl fmt::Display for ObjectAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:#06X}/{:#04X} on node {}",
            self.index, self.subindex, self.node_id
        )
    }
}

// --- Core Protocol Identifiers ---

/// Frame opcodes understood by the EPOS serial protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    /// Every frame sent by the device back to the host.
    Response = 0x00,
    /// ReadObject request (4-byte payload).
    ReadObject = 0x10,
    /// WriteObject request (8-byte payload).
    WriteObject = 0x11,
}

/// Error type for bytes that are not a known opcode.
#[derive(Debug, PartialEq, Eq)]
pub struct InvalidOpcodeError(pub u8);

impl fmt::Display for InvalidOpcodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid opcode value: {:#04x}", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidOpcodeError {}

impl TryFrom<u8> for Opcode {
    type Error = InvalidOpcodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Opcode::Response),
            0x10 => Ok(Opcode::ReadObject),
            0x11 => Ok(Opcode::WriteObject),
            _ => Err(InvalidOpcodeError(value)),
        }
    }
}

impl From<Opcode> for u8 {
    fn from(opcode: Opcode) -> Self {
        opcode as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_opcode_try_from() {
        assert_eq!(Opcode::try_from(0x00), Ok(Opcode::Response));
        assert_eq!(Opcode::try_from(0x10), Ok(Opcode::ReadObject));
        assert_eq!(Opcode::try_from(0x11), Ok(Opcode::WriteObject));
        assert_eq!(Opcode::try_from(0x12), Err(InvalidOpcodeError(0x12)));
        assert_eq!(u8::from(Opcode::WriteObject), 0x11);
    }

    #[test]
    fn test_object_address_display() {
        let address = ObjectAddress::new(0x6040, 0, NODE_ID_ANY);
        assert_eq!(address.to_string(), "0x6040/0x00 on node 0");
    }
}
