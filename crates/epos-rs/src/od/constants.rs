// crates/epos-rs/src/od/constants.rs
//! Object indices and command words of the EPOS device profile.
//!
//! Uses the same `IDX_` naming convention for indices; command words are
//! values written to the control word object.

use core::convert::TryFrom;
use core::fmt;

// --- 0x2000 - 0x5FFF: Manufacturer Specific Profile Area ---
pub const IDX_POSITION_MODE_SETTING_VALUE: u16 = 0x2062;
pub const IDX_VELOCITY_MODE_SETTING_VALUE: u16 = 0x206B;

// --- 0x6000 - 0x9FFF: Device Profile Area (DSP 402) ---
pub const IDX_CONTROL_WORD: u16 = 0x6040;
pub const IDX_MODES_OF_OPERATION: u16 = 0x6060;
pub const IDX_POSITION_ACTUAL_VALUE: u16 = 0x6064;
pub const IDX_TARGET_POSITION: u16 = 0x607A;
pub const IDX_TARGET_VELOCITY: u16 = 0x60FF;

// --- Control word commands ---
pub const CMD_FAULT_RESET: u16 = 0x0080;
pub const CMD_SHUTDOWN: u16 = 0x0006;
pub const CMD_SWITCH_ON: u16 = 0x0007;
pub const CMD_ENABLE_OPERATION: u16 = 0x000F;
pub const CMD_HALT: u16 = 0x0102;
pub const CMD_GOTO_POSITION_REL: u16 = 0x007F;
pub const CMD_GOTO_POSITION_ABS: u16 = 0x003F;
pub const CMD_GOTO_VELOCITY: u16 = 0x000F;

/// Values of the Modes of Operation object (0x6060).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OperationMode {
    Homing = 0x06,
    ProfileVelocity = 0x03,
    ProfilePosition = 0x01,
    Position = 0xFF,
    Velocity = 0xFE,
    Current = 0xFD,
    Diagnostic = 0xFC,
    MasterEncoder = 0xFB,
    StepDirection = 0xFA,
}

impl OperationMode {
    /// Value written to the object. Only the low byte is significant.
    pub fn object_value(self) -> u32 {
        self as u8 as u32
    }
}

impl TryFrom<u8> for OperationMode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x06 => Ok(Self::Homing),
            0x03 => Ok(Self::ProfileVelocity),
            0x01 => Ok(Self::ProfilePosition),
            0xFF => Ok(Self::Position),
            0xFE => Ok(Self::Velocity),
            0xFD => Ok(Self::Current),
            0xFC => Ok(Self::Diagnostic),
            0xFB => Ok(Self::MasterEncoder),
            0xFA => Ok(Self::StepDirection),
            _ => Err(value),
        }
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Homing => "homing",
            Self::ProfileVelocity => "profile velocity",
            Self::ProfilePosition => "profile position",
            Self::Position => "position",
            Self::Velocity => "velocity",
            Self::Current => "current",
            Self::Diagnostic => "diagnostic",
            Self::MasterEncoder => "master encoder",
            Self::StepDirection => "step/direction",
        };
        f.write_str(name)
    }
}
