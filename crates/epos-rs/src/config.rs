// crates/epos-rs/src/config.rs
//! Static driver configuration, fixed once per deployment.

use crate::frame::ProtocolVariant;
use crate::types::DEFAULT_TIMEOUT;
use core::time::Duration;

/// Settings shared by every frame exchange of one driver instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// Wire format spoken by the connected firmware. Never changes mid-session.
    pub variant: ProtocolVariant,
    /// Timeout handed to every `Transport::read_exact` call.
    pub timeout: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            variant: ProtocolVariant::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl DriverConfig {
    pub fn new(variant: ProtocolVariant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
