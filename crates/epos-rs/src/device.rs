// crates/epos-rs/src/device.rs
use crate::config::DriverConfig;
use crate::frame::FrameCodec;
use crate::hal::Transport;
use crate::od::{self, AccessError};
use crate::types::{NodeId, ObjectAddress};

/// A connected EPOS controller reachable through one transport handle.
///
/// Owns the transport so exchanges are serialized by `&mut self`. Sharing a
/// device between threads requires an external lock around the whole value.
pub struct EposDevice<T: Transport> {
    transport: T,
    codec: FrameCodec,
}

impl<T: Transport> EposDevice<T> {
    pub fn new(transport: T, config: DriverConfig) -> Self {
        Self {
            transport,
            codec: FrameCodec::new(&config),
        }
    }

    pub fn codec(&self) -> &FrameCodec {
        &self.codec
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Releases the underlying transport.
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Reads `index`/`subindex` from the object dictionary of `node_id`.
    pub fn read_object(
        &mut self,
        index: u16,
        subindex: u8,
        node_id: NodeId,
    ) -> Result<u32, AccessError> {
        self.read(ObjectAddress::new(index, subindex, node_id))
    }

    /// Writes `value` to `index`/`subindex` in the object dictionary of `node_id`.
    pub fn write_object(
        &mut self,
        index: u16,
        subindex: u8,
        node_id: NodeId,
        value: u32,
    ) -> Result<(), AccessError> {
        self.write(ObjectAddress::new(index, subindex, node_id), value)
    }

    pub fn read(&mut self, address: ObjectAddress) -> Result<u32, AccessError> {
        od::read_object(&mut self.transport, &self.codec, address)
    }

    pub fn write(&mut self, address: ObjectAddress, value: u32) -> Result<(), AccessError> {
        od::write_object(&mut self.transport, &self.codec, address, value)
    }
}
