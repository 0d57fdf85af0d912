// crates/epos-rs-cli/src/commands.rs
use crate::args::{Command, ConnectionArgs};
use anyhow::{Context, Result};
use epos_rs::od::commands;
use epos_rs::od::constants::OperationMode;
use epos_rs::{DriverConfig, EposDevice, NodeId, Transport};
use epos_rs_serial::{LineConfig, SerialTransport};
use log::info;
use std::io::Write;
use std::time::Duration;

/// Opens the serial port named by a device command.
pub fn connect(port: &str, args: &ConnectionArgs) -> Result<EposDevice<SerialTransport>> {
    let line = LineConfig::default().with_baud_rate(args.baud);
    let transport = SerialTransport::open(port, &line).context("Error opening port, aborting")?;
    let config = DriverConfig::new(args.variant.into())
        .with_timeout(Duration::from_millis(args.timeout_ms));
    info!("Connected to {} ({} protocol)", port, config.variant);
    Ok(EposDevice::new(transport, config))
}

/// Formats a read result as a signed value followed by its raw bits.
pub fn format_read_value(value: u32) -> String {
    format!("read value: {} [0x{:08x}]", value as i32, value)
}

/// Runs one device command against an already connected device.
pub fn run<T: Transport>(
    device: &mut EposDevice<T>,
    command: &Command,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Write {
            index,
            subindex,
            node_id,
            value,
            ..
        } => {
            device
                .write_object(*index, *subindex, NodeId(*node_id), *value)
                .context("Error writing object")?;
        }
        Command::Read {
            index,
            subindex,
            node_id,
            ..
        } => {
            let value = device
                .read_object(*index, *subindex, NodeId(*node_id))
                .context("Error reading object")?;
            writeln!(out, "{}", format_read_value(value))?;
        }
        Command::Init { node, .. } => {
            commands::initialize(device, NodeId(node.node_id))
                .context("Error in initialization sequence")?;
        }
        Command::Move { target, node, .. } => {
            let node_id = NodeId(node.node_id);
            commands::set_mode(device, node_id, OperationMode::ProfilePosition)
                .context("Error setting mode, aborting")?;
            commands::set_target_position(device, node_id, *target)
                .context("Error setting target position, aborting")?;
            commands::goto_position_rel(device, node_id)
                .context("Error sending go to position command, aborting")?;
        }
        Command::Pos { target, node, .. } => {
            let node_id = NodeId(node.node_id);
            commands::set_mode(device, node_id, OperationMode::Position)
                .context("Error setting mode, aborting")?;
            commands::set_position_setpoint(device, node_id, *target)
                .context("Error setting position setpoint, aborting")?;
        }
        Command::Vel { target, node, .. } => {
            let node_id = NodeId(node.node_id);
            commands::set_mode(device, node_id, OperationMode::Velocity)
                .context("Error setting mode, aborting")?;
            commands::set_velocity_setpoint(device, node_id, *target)
                .context("Error setting velocity setpoint, aborting")?;
        }
        Command::Ports => list_ports(out)?,
    }
    Ok(())
}

/// Prints the serial ports present on this machine, one per line.
pub fn list_ports(out: &mut impl Write) -> Result<()> {
    for port in epos_rs_serial::available_ports()? {
        writeln!(out, "{}", port)?;
    }
    Ok(())
}

/// Port named by a device command, or `None` for commands that need no device.
pub fn port_of(command: &Command) -> Option<&str> {
    match command {
        Command::Write { port, .. }
        | Command::Read { port, .. }
        | Command::Init { port, .. }
        | Command::Move { port, .. }
        | Command::Pos { port, .. }
        | Command::Vel { port, .. } => Some(port),
        Command::Ports => None,
    }
}
