// crates/epos-rs-cli/src/args.rs
use clap::{Args, Parser, Subcommand, ValueEnum};
use epos_rs::ProtocolVariant;

#[derive(Debug, Parser)]
#[command(name = "eposcmd", version, about = "Send commands to an EPOS motor controller")]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Increase log output (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Settings shared by every command that talks to a device.
#[derive(Debug, Clone, Args)]
pub struct ConnectionArgs {
    /// Wire format spoken by the controller.
    #[arg(long, value_enum, default_value_t = VariantArg::Epos, global = true)]
    pub variant: VariantArg,

    /// How long to wait for each device reply, in milliseconds.
    #[arg(long, default_value_t = 100, global = true)]
    pub timeout_ms: u64,

    /// Serial line speed.
    #[arg(long, default_value_t = epos_rs_serial::DEFAULT_BAUD_RATE, global = true)]
    pub baud: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    Epos,
    Epos2,
}

impl From<VariantArg> for ProtocolVariant {
    fn from(variant: VariantArg) -> Self {
        match variant {
            VariantArg::Epos => ProtocolVariant::Epos,
            VariantArg::Epos2 => ProtocolVariant::Epos2,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write a 32-bit value to an object.
    Write {
        port: String,
        #[arg(value_parser = parse_u16)]
        index: u16,
        #[arg(value_parser = parse_u8)]
        subindex: u8,
        #[arg(value_parser = parse_u8)]
        node_id: u8,
        #[arg(value_parser = parse_u32, allow_negative_numbers = true)]
        value: u32,
    },
    /// Read a 32-bit value from an object.
    Read {
        port: String,
        #[arg(value_parser = parse_u16)]
        index: u16,
        #[arg(value_parser = parse_u8)]
        subindex: u8,
        #[arg(value_parser = parse_u8)]
        node_id: u8,
    },
    /// Reset faults and enable operation.
    Init {
        port: String,
        #[command(flatten)]
        node: NodeArg,
    },
    /// Relative move in profile position mode.
    Move {
        port: String,
        #[arg(value_parser = parse_i32, allow_negative_numbers = true)]
        target: i32,
        #[command(flatten)]
        node: NodeArg,
    },
    /// Set the position setpoint in position mode.
    Pos {
        port: String,
        #[arg(value_parser = parse_i32, allow_negative_numbers = true)]
        target: i32,
        #[command(flatten)]
        node: NodeArg,
    },
    /// Set the velocity setpoint in velocity mode.
    Vel {
        port: String,
        #[arg(value_parser = parse_i32, allow_negative_numbers = true)]
        target: i32,
        #[command(flatten)]
        node: NodeArg,
    },
    /// List serial ports present on this machine.
    Ports,
}

#[derive(Debug, Clone, Copy, Args)]
pub struct NodeArg {
    /// Node to address on the device bus (0 = first device).
    #[arg(long, default_value = "0", value_parser = parse_u8)]
    pub node_id: u8,
}

/// Parses an integer the way C's `strtol(s, _, 0)` does: optional sign,
/// `0x` prefix for hex, leading `0` for octal, decimal otherwise. Unlike
/// `strtol`, trailing garbage is an error.
pub fn parse_int(text: &str) -> Result<i64, String> {
    let trimmed = text.trim();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (radix, digits) = if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        (16, hex)
    } else if unsigned.len() > 1 && unsigned.starts_with('0') {
        (8, &unsigned[1..])
    } else {
        (10, unsigned)
    };
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(format!("invalid number '{}'", text));
    }
    let magnitude =
        i64::from_str_radix(digits, radix).map_err(|e| format!("invalid number '{}': {}", text, e))?;
    Ok(if negative { -magnitude } else { magnitude })
}

fn parse_ranged(text: &str, min: i64, max: i64) -> Result<i64, String> {
    let value = parse_int(text)?;
    if value < min || value > max {
        return Err(format!("{} is out of range {}..={}", text, min, max));
    }
    Ok(value)
}

pub fn parse_u8(text: &str) -> Result<u8, String> {
    parse_ranged(text, 0, u8::MAX as i64).map(|v| v as u8)
}

pub fn parse_u16(text: &str) -> Result<u16, String> {
    parse_ranged(text, 0, u16::MAX as i64).map(|v| v as u16)
}

pub fn parse_i32(text: &str) -> Result<i32, String> {
    parse_ranged(text, i32::MIN as i64, i32::MAX as i64).map(|v| v as i32)
}

/// Accepts the full unsigned range and negative values down to `i32::MIN`,
/// which are sent as their two's complement.
pub fn parse_u32(text: &str) -> Result<u32, String> {
    parse_ranged(text, i32::MIN as i64, u32::MAX as i64).map(|v| v as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_bases() {
        assert_eq!(parse_int("42"), Ok(42));
        assert_eq!(parse_int("0x6040"), Ok(0x6040));
        assert_eq!(parse_int("0X1f"), Ok(0x1F));
        assert_eq!(parse_int("017"), Ok(15));
        assert_eq!(parse_int("0"), Ok(0));
        assert_eq!(parse_int("-100"), Ok(-100));
        assert_eq!(parse_int("+7"), Ok(7));
        assert_eq!(parse_int("-0x10"), Ok(-16));
    }

    #[test]
    fn test_parse_int_rejects_garbage() {
        assert!(parse_int("").is_err());
        assert!(parse_int("0x").is_err());
        assert!(parse_int("12abc").is_err());
        assert!(parse_int("08").is_err());
        assert!(parse_int("--1").is_err());
        assert!(parse_int("0x-1").is_err());
    }

    #[test]
    fn test_ranged_parsers() {
        assert_eq!(parse_u8("255"), Ok(255));
        assert!(parse_u8("256").is_err());
        assert!(parse_u16("-1").is_err());
        assert_eq!(parse_u32("-1"), Ok(0xFFFF_FFFF));
        assert_eq!(parse_u32("0xFFFFFFFF"), Ok(u32::MAX));
        assert_eq!(parse_i32("-2147483648"), Ok(i32::MIN));
        assert!(parse_i32("2147483648").is_err());
    }

    #[test]
    fn test_cli_read_command() {
        let cli = Cli::try_parse_from(["eposcmd", "read", "/dev/ttyUSB0", "0x6064", "0", "1"]).unwrap();
        assert_eq!(cli.connection.variant, VariantArg::Epos);
        assert_eq!(cli.connection.timeout_ms, 100);
        match cli.command {
            Command::Read {
                port,
                index,
                subindex,
                node_id,
            } => {
                assert_eq!(port, "/dev/ttyUSB0");
                assert_eq!((index, subindex, node_id), (0x6064, 0, 1));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_negative_target_and_options() {
        let cli = Cli::try_parse_from([
            "eposcmd", "move", "/dev/ttyS0", "-1000", "--node-id", "2", "--variant", "epos2", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(ProtocolVariant::from(cli.connection.variant), ProtocolVariant::Epos2);
        match cli.command {
            Command::Move { target, node, .. } => {
                assert_eq!(target, -1000);
                assert_eq!(node.node_id, 2);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_missing_arguments() {
        assert!(Cli::try_parse_from(["eposcmd", "write", "/dev/ttyUSB0", "0x6040", "0", "0"]).is_err());
        assert!(Cli::try_parse_from(["eposcmd", "read", "/dev/ttyUSB0", "0x10000", "0", "0"]).is_err());
    }
}
