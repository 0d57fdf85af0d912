// crates/epos-rs/src/od/mod.rs
//! Object dictionary access over the EPOS frame protocol.
//!
//! Every read or write is a single round trip: one request frame sent with
//! the handshake of [`FrameCodec::send_frame`], one response frame received
//! with [`FrameCodec::recv_frame`]. Nothing is retried or buffered across
//! calls.

pub mod commands;
pub mod constants;
mod error;
pub mod payload;

pub use constants::OperationMode;
pub use error::{AccessError, DeviceErrorCode};
pub use payload::{
    PayloadCodec, ReadObjectRequest, ReadObjectResponse, WriteObjectRequest, WriteObjectResponse,
};

use crate::frame::FrameCodec;
use crate::hal::Transport;
use crate::log::{diag_debug, diag_trace};
use crate::types::{ObjectAddress, Opcode};

/// Reads a 32-bit object from the device's object dictionary.
///
/// Returns `AccessError::Device` if the device answered with a nonzero
/// status code.
pub fn read_object<T: Transport + ?Sized>(
    transport: &mut T,
    codec: &FrameCodec,
    address: ObjectAddress,
) -> Result<u32, AccessError> {
    // Stale bytes from an aborted exchange would desynchronize the handshake.
    transport.discard_input()?;

    let mut request = [0u8; ReadObjectRequest::SIZE];
    ReadObjectRequest { address }.serialize(&mut request)?;
    diag_debug!(address => "Sending ReadObject request");
    codec.send_frame(transport, Opcode::ReadObject.into(), &request)?;

    let payload = codec.recv_frame(transport, ReadObjectResponse::SIZE)?;
    let response = ReadObjectResponse::deserialize(&payload)?;
    check_status(&address, response.error_code)?;

    diag_trace!(address => "ReadObject returned {:#010x}", response.value);
    Ok(response.value)
}

/// Writes a 32-bit value to the device's object dictionary.
///
/// Returns `AccessError::Device` if the device answered with a nonzero
/// status code.
pub fn write_object<T: Transport + ?Sized>(
    transport: &mut T,
    codec: &FrameCodec,
    address: ObjectAddress,
    value: u32,
) -> Result<(), AccessError> {
    transport.discard_input()?;

    let mut request = [0u8; WriteObjectRequest::SIZE];
    WriteObjectRequest { address, value }.serialize(&mut request)?;
    diag_debug!(address => "Sending WriteObject request value={:#010x}", value);
    codec.send_frame(transport, Opcode::WriteObject.into(), &request)?;

    let payload = codec.recv_frame(transport, WriteObjectResponse::SIZE)?;
    let response = WriteObjectResponse::deserialize(&payload)?;
    check_status(&address, response.error_code)
}

fn check_status(address: &ObjectAddress, error_code: u32) -> Result<(), AccessError> {
    if error_code == 0 {
        return Ok(());
    }
    let code = DeviceErrorCode(error_code);
    diag_debug!(*address => "Device reported error {}", code);
    Err(AccessError::Device(code))
}
