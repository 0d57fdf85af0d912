use crate::frame::ProtocolError;
use crate::hal::TransportError;
use core::fmt;

/// Status code reported by the device inside an otherwise valid response.
///
/// The driver does not interpret the value; [`description`](Self::description)
/// only names the well-known EPOS/CANopen abort codes for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceErrorCode(pub u32);

impl DeviceErrorCode {
    /// Human-readable name of a well-known code.
    pub fn description(&self) -> Option<&'static str> {
        let text = match self.0 {
            0x0503_0000 => "Toggle bit not alternated",
            0x0504_0000 => "SDO protocol timed out",
            0x0504_0001 => "Client/server command specifier not valid or unknown",
            0x0504_0002 => "Invalid block size",
            0x0504_0003 => "Invalid sequence number",
            0x0504_0004 => "CRC error",
            0x0504_0005 => "Out of memory",
            0x0601_0000 => "Unsupported access to an object",
            0x0601_0001 => "Attempt to read a write-only object",
            0x0601_0002 => "Attempt to write a read-only object",
            0x0602_0000 => "Object does not exist in the object dictionary",
            0x0604_0041 => "Object cannot be mapped to the PDO",
            0x0604_0042 => "Number and length of objects to be mapped would exceed PDO length",
            0x0604_0043 => "General parameter incompatibility",
            0x0604_0047 => "General internal incompatibility in the device",
            0x0606_0000 => "Access failed due to a hardware error",
            0x0607_0010 => "Data type does not match, length of service parameter does not match",
            0x0607_0012 => "Data type does not match, length of service parameter too high",
            0x0607_0013 => "Data type does not match, length of service parameter too low",
            0x0609_0011 => "Subindex does not exist",
            0x0609_0030 => "Value range of parameter exceeded",
            0x0609_0031 => "Value of parameter written too high",
            0x0609_0032 => "Value of parameter written too low",
            0x0609_0036 => "Maximum value is less than minimum value",
            0x0800_0000 => "General error",
            0x0800_0020 => "Data cannot be transferred or stored to the application",
            0x0800_0021 => "Data cannot be transferred or stored because of local control",
            0x0800_0022 => "Data cannot be transferred or stored because of the present device state",
            0x0F00_FFB9 => "Wrong node ID",
            0x0F00_FFBC => "Device is not in service mode",
            0x0F00_FFBE => "Password is incorrect",
            0x0F00_FFBF => "Illegal command",
            0x0F00_FFC0 => "Device is in wrong NMT state",
            _ => return None,
        };
        Some(text)
    }
}

impl fmt::Display for DeviceErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.description() {
            Some(text) => write!(f, "{:#010x} ({})", self.0, text),
            None => write!(f, "{:#010x}", self.0),
        }
    }
}

impl From<u32> for DeviceErrorCode {
    fn from(code: u32) -> Self {
        DeviceErrorCode(code)
    }
}

/// Failures of an object dictionary read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    /// The frame exchange itself failed.
    Protocol(ProtocolError),
    /// The exchange succeeded but the device reported a nonzero status code.
    Device(DeviceErrorCode),
}

impl AccessError {
    /// Returns the device status code if the device itself reported the failure.
    pub fn device_code(&self) -> Option<u32> {
        match self {
            Self::Device(code) => Some(code.0),
            Self::Protocol(_) => None,
        }
    }
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Protocol(e) => write!(f, "Frame exchange failed: {}", e),
            Self::Device(code) => write!(f, "Device reported error {}", code),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AccessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Protocol(e) => Some(e),
            Self::Device(_) => None,
        }
    }
}

// --- From Implementations for Error Conversion ---

impl From<ProtocolError> for AccessError {
    fn from(err: ProtocolError) -> Self {
        AccessError::Protocol(err)
    }
}

impl From<TransportError> for AccessError {
    fn from(err: TransportError) -> Self {
        AccessError::Protocol(ProtocolError::Transport(err))
    }
}
