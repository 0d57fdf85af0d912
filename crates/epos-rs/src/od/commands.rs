// crates/epos-rs/src/od/commands.rs
//! Fixed-value writes for driving the device state machine and setpoints.
//! Each function is one WriteObject (or ReadObject) round trip.

use super::constants::*;
use super::AccessError;
use crate::device::EposDevice;
use crate::hal::Transport;
use crate::types::NodeId;

fn control_word<T: Transport>(
    device: &mut EposDevice<T>,
    node_id: NodeId,
    command: u16,
) -> Result<(), AccessError> {
    device.write_object(IDX_CONTROL_WORD, 0, node_id, command as u32)
}

pub fn fault_reset<T: Transport>(device: &mut EposDevice<T>, node_id: NodeId) -> Result<(), AccessError> {
    control_word(device, node_id, CMD_FAULT_RESET)
}

pub fn shutdown<T: Transport>(device: &mut EposDevice<T>, node_id: NodeId) -> Result<(), AccessError> {
    control_word(device, node_id, CMD_SHUTDOWN)
}

pub fn switch_on<T: Transport>(device: &mut EposDevice<T>, node_id: NodeId) -> Result<(), AccessError> {
    control_word(device, node_id, CMD_SWITCH_ON)
}

pub fn enable_operation<T: Transport>(
    device: &mut EposDevice<T>,
    node_id: NodeId,
) -> Result<(), AccessError> {
    control_word(device, node_id, CMD_ENABLE_OPERATION)
}

pub fn halt<T: Transport>(device: &mut EposDevice<T>, node_id: NodeId) -> Result<(), AccessError> {
    control_word(device, node_id, CMD_HALT)
}

pub fn goto_position_rel<T: Transport>(
    device: &mut EposDevice<T>,
    node_id: NodeId,
) -> Result<(), AccessError> {
    control_word(device, node_id, CMD_GOTO_POSITION_REL)
}

pub fn goto_position_abs<T: Transport>(
    device: &mut EposDevice<T>,
    node_id: NodeId,
) -> Result<(), AccessError> {
    control_word(device, node_id, CMD_GOTO_POSITION_ABS)
}

pub fn goto_velocity<T: Transport>(device: &mut EposDevice<T>, node_id: NodeId) -> Result<(), AccessError> {
    control_word(device, node_id, CMD_GOTO_VELOCITY)
}

pub fn set_mode<T: Transport>(
    device: &mut EposDevice<T>,
    node_id: NodeId,
    mode: OperationMode,
) -> Result<(), AccessError> {
    device.write_object(IDX_MODES_OF_OPERATION, 0, node_id, mode.object_value())
}

pub fn set_target_position<T: Transport>(
    device: &mut EposDevice<T>,
    node_id: NodeId,
    position: i32,
) -> Result<(), AccessError> {
    device.write_object(IDX_TARGET_POSITION, 0, node_id, position as u32)
}

pub fn set_target_velocity<T: Transport>(
    device: &mut EposDevice<T>,
    node_id: NodeId,
    velocity: i32,
) -> Result<(), AccessError> {
    device.write_object(IDX_TARGET_VELOCITY, 0, node_id, velocity as u32)
}

/// Setpoint used while the device is in [`OperationMode::Position`].
pub fn set_position_setpoint<T: Transport>(
    device: &mut EposDevice<T>,
    node_id: NodeId,
    position: i32,
) -> Result<(), AccessError> {
    device.write_object(IDX_POSITION_MODE_SETTING_VALUE, 0, node_id, position as u32)
}

/// Setpoint used while the device is in [`OperationMode::Velocity`].
pub fn set_velocity_setpoint<T: Transport>(
    device: &mut EposDevice<T>,
    node_id: NodeId,
    velocity: i32,
) -> Result<(), AccessError> {
    device.write_object(IDX_VELOCITY_MODE_SETTING_VALUE, 0, node_id, velocity as u32)
}

pub fn read_actual_position<T: Transport>(
    device: &mut EposDevice<T>,
    node_id: NodeId,
) -> Result<i32, AccessError> {
    device
        .read_object(IDX_POSITION_ACTUAL_VALUE, 0, node_id)
        .map(|value| value as i32)
}

/// Brings the device from any fault state to Operation Enabled.
///
/// Sends fault reset, shutdown, switch on and enable operation in order and
/// stops at the first failure.
pub fn initialize<T: Transport>(device: &mut EposDevice<T>, node_id: NodeId) -> Result<(), AccessError> {
    fault_reset(device, node_id)?;
    shutdown(device, node_id)?;
    switch_on(device, node_id)?;
    enable_operation(device, node_id)
}
