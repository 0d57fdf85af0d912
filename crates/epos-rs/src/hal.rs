use core::fmt;
use core::time::Duration;

/// Failures reported by the byte channel underneath the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// Not all requested bytes arrived before the read timeout elapsed.
    Timeout,
    /// An underlying I/O error occurred.
    Io,
    /// The channel was closed by the peer or the OS.
    Closed,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "Not all data received before timeout"),
            Self::Io => write!(f, "An underlying I/O error occurred"),
            Self::Closed => write!(f, "The transport channel is closed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TransportError {}

/// Hardware Abstraction Layer (HAL) for the serial byte channel.
///
/// This trait abstracts blocking byte transfer to and from the device,
/// enabling the frame protocol to remain platform-agnostic (no_std).
/// Implementations are expected to already be configured for the link
/// (115200 baud, 8N1) before the first frame exchange.
pub trait Transport {
    /// Writes all of `bytes` or fails.
    fn write_exact(&mut self, bytes: &[u8]) -> Result<(), TransportError>;

    /// Fills `buffer` completely within `timeout`.
    ///
    /// Must return `TransportError::Timeout` if fewer bytes arrived in time.
    /// The contents of `buffer` are unspecified on error.
    fn read_exact(&mut self, buffer: &mut [u8], timeout: Duration) -> Result<(), TransportError>;

    /// Drops any stale bytes left over from an aborted exchange.
    ///
    /// Called by the object dictionary layer before every round trip.
    fn discard_input(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write_exact(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        (**self).write_exact(bytes)
    }

    fn read_exact(&mut self, buffer: &mut [u8], timeout: Duration) -> Result<(), TransportError> {
        (**self).read_exact(buffer, timeout)
    }

    fn discard_input(&mut self) -> Result<(), TransportError> {
        (**self).discard_input()
    }
}

#[cfg(feature = "std")]
impl<T: Transport + ?Sized> Transport for std::boxed::Box<T> {
    fn write_exact(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        (**self).write_exact(bytes)
    }

    fn read_exact(&mut self, buffer: &mut [u8], timeout: Duration) -> Result<(), TransportError> {
        (**self).read_exact(buffer, timeout)
    }

    fn discard_input(&mut self) -> Result<(), TransportError> {
        (**self).discard_input()
    }
}
