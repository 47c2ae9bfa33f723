//! Common test utilities and shared imports

// Allow unused imports and dead code since this is a shared module
// used across multiple test files - not all items are used in every test file
#[allow(unused_imports)]
pub use kfly_comm::codec::Codec;
#[allow(unused_imports)]
pub use kfly_comm::commands::Command;
#[allow(unused_imports)]
pub use kfly_comm::crc::crc16;
#[allow(unused_imports)]
pub use kfly_comm::datagrams::*;
#[allow(unused_imports)]
pub use kfly_comm::enums::Port;
#[allow(unused_imports)]
pub use kfly_comm::error::KFlyError;
#[allow(unused_imports)]
pub use kfly_comm::slip::{self, SlipDecoder};

use std::sync::{Arc, Mutex};

/// SLIP frame of the payload-less Ping command, pinned by the device.
#[allow(dead_code)]
pub const PING_FRAME: &[u8] = &[0xC0, 0x02, 0x00, 0x6D, 0x7B, 0xC0];

/// Decode hex string to bytes for testing
#[allow(dead_code)]
pub fn hex_to_bytes(hex_data: &str) -> Vec<u8> {
    hex::decode(hex_data).expect("Failed to decode hex")
}

/// Build a complete SLIP frame around `command` and `payload`, CRC included.
///
/// Used to synthesize device-to-host frames for receive-only datagrams.
#[allow(dead_code)]
pub fn build_frame(command: u8, payload: &[u8]) -> Vec<u8> {
    let mut body = vec![command, payload.len() as u8];
    body.extend_from_slice(payload);
    let crc = crc16(&body);
    body.extend_from_slice(&crc.to_le_bytes());
    slip::encode(&body)
}

/// Records every datagram it receives.
///
/// Register with `codec.register_method_callback(&recorder, Recorder::record)`.
pub struct Recorder<T> {
    values: Mutex<Vec<T>>,
}

#[allow(dead_code)]
impl<T: Clone> Recorder<T> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            values: Mutex::new(Vec::new()),
        })
    }

    pub fn record(&self, value: T) {
        self.values.lock().unwrap().push(value);
    }

    pub fn count(&self) -> usize {
        self.values.lock().unwrap().len()
    }

    pub fn values(&self) -> Vec<T> {
        self.values.lock().unwrap().clone()
    }
}
