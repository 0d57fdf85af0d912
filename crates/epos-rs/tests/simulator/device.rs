// crates/epos-rs/tests/simulator/device.rs
use epos_rs::frame::Ack;
use epos_rs::od::{
    PayloadCodec, ReadObjectRequest, ReadObjectResponse, WriteObjectRequest, WriteObjectResponse,
};
use epos_rs::{Frame, ObjectAddress, Opcode, ProtocolVariant, Transport, TransportError, encode_frame};
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

/// Error code returned for objects the simulated device does not know.
pub const OBJECT_DOES_NOT_EXIST: u32 = 0x0602_0000;
/// Error code returned for opcodes the simulated device does not handle.
pub const COMMAND_UNKNOWN: u32 = 0x0504_0001;

/// Receive-side state of the device, driven one host byte at a time.
#[derive(Debug)]
enum DeviceState {
    /// Waiting for the opcode of a host request.
    Idle,
    AwaitLength { opcode: u8 },
    AwaitPayload { opcode: u8, length_field: u8, payload: Vec<u8> },
    AwaitChecksum { opcode: u8, length_field: u8, payload: Vec<u8>, checksum: Vec<u8> },
    /// Response opcode sent, waiting for the host's ready ack.
    AwaitReadyAck,
    /// Response checksum sent, waiting for the host's end ack.
    AwaitEndAck,
}

/// A byte-level model of an EPOS controller.
///
/// Implements [`Transport`] from the host's point of view: every byte the
/// host writes is parsed by the device state machine, and every reply the
/// device produces is queued for the host to read.
pub struct SimulatedEpos {
    variant: ProtocolVariant,
    state: DeviceState,
    /// Bytes queued for the host.
    outbox: VecDeque<u8>,
    /// Object values keyed by (index, subindex).
    objects: HashMap<(u16, u8), u32>,
    /// Error codes forced for specific objects.
    faults: HashMap<(u16, u8), u32>,
    /// Number of upcoming requests to refuse with a not-ready ack.
    busy_requests: usize,
    /// Bit to flip in the next response (counted from the first payload byte).
    corrupt_next_response: Option<usize>,
    /// Every successful write, in order.
    pub write_log: Vec<(ObjectAddress, u32)>,
    /// Acks the host sent while receiving responses.
    pub host_acks: Vec<u8>,
    /// Requests dropped because of a bad checksum.
    pub rejected_requests: usize,
    /// Number of times the host flushed its input.
    pub discards: usize,
}

impl SimulatedEpos {
    pub fn new(variant: ProtocolVariant) -> Self {
        Self {
            variant,
            state: DeviceState::Idle,
            outbox: VecDeque::new(),
            objects: HashMap::new(),
            faults: HashMap::new(),
            busy_requests: 0,
            corrupt_next_response: None,
            write_log: Vec::new(),
            host_acks: Vec::new(),
            rejected_requests: 0,
            discards: 0,
        }
    }

    pub fn with_object(mut self, index: u16, subindex: u8, value: u32) -> Self {
        self.objects.insert((index, subindex), value);
        self
    }

    pub fn object(&self, index: u16, subindex: u8) -> Option<u32> {
        self.objects.get(&(index, subindex)).copied()
    }

    /// Makes every access to the object fail with `code`.
    pub fn inject_fault(&mut self, index: u16, subindex: u8, code: u32) {
        self.faults.insert((index, subindex), code);
    }

    /// Refuses the next `count` requests with a not-ready ack.
    pub fn set_busy(&mut self, count: usize) {
        self.busy_requests = count;
    }

    /// Flips one bit of the next response after its checksum is computed.
    pub fn corrupt_next_response(&mut self, bit: usize) {
        self.corrupt_next_response = Some(bit);
    }

    fn on_host_byte(&mut self, byte: u8) {
        let state = std::mem::replace(&mut self.state, DeviceState::Idle);
        self.state = match state {
            DeviceState::Idle => {
                if self.busy_requests > 0 {
                    self.busy_requests -= 1;
                    self.outbox.push_back(Ack::Fail.into());
                    DeviceState::Idle
                } else {
                    self.outbox.push_back(Ack::Okay.into());
                    DeviceState::AwaitLength { opcode: byte }
                }
            }
            DeviceState::AwaitLength { opcode } => DeviceState::AwaitPayload {
                opcode,
                length_field: byte,
                payload: Vec::new(),
            },
            DeviceState::AwaitPayload { opcode, length_field, mut payload } => {
                payload.push(byte);
                if payload.len() == self.variant.payload_len(length_field) {
                    DeviceState::AwaitChecksum { opcode, length_field, payload, checksum: Vec::new() }
                } else {
                    DeviceState::AwaitPayload { opcode, length_field, payload }
                }
            }
            DeviceState::AwaitChecksum { opcode, length_field, payload, mut checksum } => {
                checksum.push(byte);
                if checksum.len() < 2 {
                    DeviceState::AwaitChecksum { opcode, length_field, payload, checksum }
                } else {
                    self.complete_request(opcode, length_field, &payload, [checksum[0], checksum[1]])
                }
            }
            DeviceState::AwaitReadyAck => {
                self.host_acks.push(byte);
                DeviceState::AwaitEndAck
            }
            DeviceState::AwaitEndAck => {
                self.host_acks.push(byte);
                DeviceState::Idle
            }
        };
    }

    fn complete_request(
        &mut self,
        opcode: u8,
        length_field: u8,
        payload: &[u8],
        checksum: [u8; 2],
    ) -> DeviceState {
        let received = u16::from_le_bytes(checksum);
        if received != self.variant.checksum(opcode, length_field, payload) {
            self.rejected_requests += 1;
            self.outbox.push_back(Ack::Fail.into());
            return DeviceState::Idle;
        }
        self.outbox.push_back(Ack::Okay.into());

        let response = self.execute(opcode, payload);
        let mut wire = encode_frame(self.variant, &Frame::response(response))
            .expect("simulated responses are always valid frames");
        if let Some(bit) = self.corrupt_next_response.take() {
            // Skip opcode and length so the host still parses the header.
            wire[2 + bit / 8] ^= 1 << (bit % 8);
        }
        self.outbox.extend(wire);
        DeviceState::AwaitReadyAck
    }

    fn execute(&mut self, opcode: u8, payload: &[u8]) -> Vec<u8> {
        match Opcode::try_from(opcode) {
            Ok(Opcode::ReadObject) => {
                let response = match ReadObjectRequest::deserialize(payload) {
                    Ok(request) => self.read(request.address),
                    Err(_) => ReadObjectResponse { error_code: COMMAND_UNKNOWN, value: 0 },
                };
                let mut buffer = vec![0u8; ReadObjectResponse::SIZE];
                response.serialize(&mut buffer).expect("buffer sized for response");
                buffer
            }
            Ok(Opcode::WriteObject) => {
                let error_code = match WriteObjectRequest::deserialize(payload) {
                    Ok(request) => self.write(request.address, request.value),
                    Err(_) => COMMAND_UNKNOWN,
                };
                let mut buffer = vec![0u8; WriteObjectResponse::SIZE];
                WriteObjectResponse { error_code }
                    .serialize(&mut buffer)
                    .expect("buffer sized for response");
                buffer
            }
            _ => COMMAND_UNKNOWN.to_le_bytes().to_vec(),
        }
    }

    fn read(&self, address: ObjectAddress) -> ReadObjectResponse {
        let key = (address.index, address.subindex);
        if let Some(&error_code) = self.faults.get(&key) {
            return ReadObjectResponse { error_code, value: 0xFFFF_FFFF };
        }
        match self.objects.get(&key) {
            Some(&value) => ReadObjectResponse { error_code: 0, value },
            None => ReadObjectResponse { error_code: OBJECT_DOES_NOT_EXIST, value: 0 },
        }
    }

    fn write(&mut self, address: ObjectAddress, value: u32) -> u32 {
        let key = (address.index, address.subindex);
        if let Some(&error_code) = self.faults.get(&key) {
            return error_code;
        }
        self.objects.insert(key, value);
        self.write_log.push((address, value));
        0
    }
}

impl Transport for SimulatedEpos {
    fn write_exact(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        for &byte in bytes {
            self.on_host_byte(byte);
        }
        Ok(())
    }

    fn read_exact(&mut self, buffer: &mut [u8], _timeout: Duration) -> Result<(), TransportError> {
        if self.outbox.len() < buffer.len() {
            return Err(TransportError::Timeout);
        }
        for slot in buffer.iter_mut() {
            *slot = self.outbox.pop_front().expect("length checked above");
        }
        Ok(())
    }

    fn discard_input(&mut self) -> Result<(), TransportError> {
        self.discards += 1;
        self.outbox.clear();
        // A new request always starts from the top of the handshake.
        self.state = DeviceState::Idle;
        Ok(())
    }
}
