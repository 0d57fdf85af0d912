// crates/epos-rs/tests/simulator/transport.rs
use epos_rs::{Transport, TransportError};
use std::collections::VecDeque;
use std::time::Duration;

/// A transport that serves pre-scripted device bytes and records
/// everything the host writes.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    /// Bytes waiting to be read by the host (device -> host).
    rx: VecDeque<u8>,
    /// Bytes written by the host (host -> device).
    tx: Vec<u8>,
    /// Number of read calls that ran out of data.
    pub timeouts: usize,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rx(bytes: &[u8]) -> Self {
        let mut transport = Self::new();
        transport.push_rx(bytes);
        transport
    }

    /// Queues bytes as if they arrived from the device.
    pub fn push_rx(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }

    /// Everything the host wrote so far.
    pub fn written(&self) -> &[u8] {
        &self.tx
    }

    /// Extracts all bytes written by the host.
    pub fn take_tx(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.tx)
    }

    pub fn pending_rx(&self) -> usize {
        self.rx.len()
    }
}

impl Transport for ScriptedTransport {
    fn write_exact(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.tx.extend_from_slice(bytes);
        Ok(())
    }

    fn read_exact(&mut self, buffer: &mut [u8], _timeout: Duration) -> Result<(), TransportError> {
        if self.rx.len() < buffer.len() {
            // A short delivery is consumed and reported as a timeout.
            self.rx.clear();
            self.timeouts += 1;
            return Err(TransportError::Timeout);
        }
        for slot in buffer.iter_mut() {
            *slot = self.rx.pop_front().expect("length checked above");
        }
        Ok(())
    }
}
