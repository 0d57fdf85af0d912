// crates/epos-rs/tests/simulator/mod.rs
// Each integration test binary uses a different subset of the simulator.
#![allow(dead_code)]

pub mod device;
pub mod transport;

pub use device::SimulatedEpos;
pub use transport::ScriptedTransport;

use epos_rs::{Frame, ProtocolVariant, encode_frame};

/// Wire bytes of a response frame carrying `payload`.
pub fn response_wire(variant: ProtocolVariant, payload: &[u8]) -> Vec<u8> {
    encode_frame(variant, &Frame::response(payload.to_vec())).expect("valid response payload")
}

/// Initializes logging for a test. Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
