#![cfg_attr(not(any(feature = "std", test)), no_std)]

// 'alloc' is used for dynamic allocation (e.g., Vec<u8> payloads)
extern crate alloc;

// --- Foundation Modules ---
pub mod types;
pub mod hal;
pub mod config;
pub(crate) mod log;

// --- Frame Layer ---
pub mod frame;

// --- Object Dictionary Layer ---
pub mod od;
pub mod device;

// --- Top-level Exports ---
pub use types::{NodeId, ObjectAddress, Opcode};
pub use hal::{Transport, TransportError};
pub use config::DriverConfig;
pub use frame::{Ack, Frame, FrameCodec, ProtocolError, ProtocolVariant};
pub use frame::codec::encode_frame;
pub use od::{AccessError, DeviceErrorCode, read_object, write_object};
pub use device::EposDevice;
