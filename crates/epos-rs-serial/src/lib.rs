// crates/epos-rs-serial/src/lib.rs
//! Serial port transport for `epos-rs`.
//!
//! Opens the port with the line settings EPOS controllers expect and maps
//! port errors onto [`TransportError`].

use epos_rs::{Transport, TransportError};
use log::{debug, trace, warn};
use serialport::{ClearBuffer, DataBits, FlowControl, Parity, SerialPort, StopBits};
use std::fmt;
use std::io::{self, Read, Write};
use std::thread;
use std::time::{Duration, Instant};

/// Default line speed of EPOS controllers.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// How long a single blocking port read may wait before the deadline is checked.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Line settings for the serial port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineConfig {
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
    pub flow_control: FlowControl,
}

impl Default for LineConfig {
    /// 115200 baud, 8N1, no flow control.
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            flow_control: FlowControl::None,
        }
    }
}

impl LineConfig {
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }
}

/// Errors raised while locating or opening a port.
#[derive(Debug)]
pub enum SerialError {
    /// The port could not be opened or configured.
    Open { path: String, source: serialport::Error },
    /// The operating system could not list serial ports.
    Enumerate(serialport::Error),
}

impl fmt::Display for SerialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => write!(f, "Failed to open serial port {}: {}", path, source),
            Self::Enumerate(source) => write!(f, "Failed to list serial ports: {}", source),
        }
    }
}

impl std::error::Error for SerialError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Enumerate(source) => Some(source),
        }
    }
}

/// Names of the serial ports present on this machine.
pub fn available_ports() -> Result<Vec<String>, SerialError> {
    serialport::available_ports()
        .map(|ports| ports.into_iter().map(|p| p.port_name).collect())
        .map_err(SerialError::Enumerate)
}

/// A [`Transport`] over an open serial port.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
    path: String,
}

impl SerialTransport {
    /// Opens `path` with the given line settings.
    pub fn open(path: &str, line: &LineConfig) -> Result<Self, SerialError> {
        let port = serialport::new(path, line.baud_rate)
            .data_bits(line.data_bits)
            .parity(line.parity)
            .stop_bits(line.stop_bits)
            .flow_control(line.flow_control)
            .timeout(POLL_INTERVAL)
            .open()
            .map_err(|source| SerialError::Open {
                path: path.to_string(),
                source,
            })?;
        debug!("Opened {} at {} baud", path, line.baud_rate);
        Ok(Self {
            port,
            path: path.to_string(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Debug for SerialTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerialTransport").field("path", &self.path).finish()
    }
}

impl Transport for SerialTransport {
    fn write_exact(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.port
            .write_all(bytes)
            .and_then(|()| self.port.flush())
            .map_err(|e| map_io_error(&self.path, e))?;
        trace!("{} <- {:02x?}", self.path, bytes);
        Ok(())
    }

    fn read_exact(&mut self, buffer: &mut [u8], timeout: Duration) -> Result<(), TransportError> {
        fill_exact(&mut self.port, buffer, timeout)?;
        trace!("{} -> {:02x?}", self.path, buffer);
        Ok(())
    }

    fn discard_input(&mut self) -> Result<(), TransportError> {
        self.port.clear(ClearBuffer::All).map_err(|e| {
            warn!("Failed to clear buffers of {}: {}", self.path, e);
            TransportError::Io
        })
    }
}

fn map_io_error(path: &str, error: io::Error) -> TransportError {
    match error.kind() {
        io::ErrorKind::TimedOut => TransportError::Timeout,
        io::ErrorKind::BrokenPipe | io::ErrorKind::NotConnected => TransportError::Closed,
        _ => {
            warn!("I/O error on {}: {}", path, error);
            TransportError::Io
        }
    }
}

/// Reads exactly `buffer.len()` bytes from `reader`, giving up once `timeout`
/// has elapsed. Bytes already read when the deadline passes are discarded
/// with the rest of the buffer.
fn fill_exact<R: Read + ?Sized>(
    reader: &mut R,
    buffer: &mut [u8],
    timeout: Duration,
) -> Result<(), TransportError> {
    let deadline = Instant::now() + timeout;
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => thread::sleep(Duration::from_millis(1)),
            Ok(n) => filled += n,
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
                ) => {}
            Err(e) => return Err(map_io_error("serial port", e)),
        }
        if filled < buffer.len() && Instant::now() >= deadline {
            return Err(TransportError::Timeout);
        }
    }
    Ok(())
}
