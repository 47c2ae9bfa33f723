use thiserror::Error;

use crate::constants::MAX_PAYLOAD_SIZE;

/// The primary error type for the `kfly-comm` library.
///
/// Receive-path failures are consumed internally (the frame is dropped and
/// the decoder resynchronizes); these variants surface only on the transmit
/// and constructor paths.
#[derive(Error, Debug)]
pub enum KFlyError {
    #[error("payload of {size} bytes exceeds the {max}-byte wire limit", max = MAX_PAYLOAD_SIZE)]
    OversizedPayload { size: usize },

    #[error("the reserved command value 0 cannot be sent on the wire")]
    ReservedCommand,

    #[error("command {0:#04x} is not a known KFly command")]
    UnknownCommand(u8),

    #[error("body of {0} bytes is shorter than the minimal packet")]
    TruncatedBody(usize),

    #[error("length field declares {declared} payload bytes but the body holds {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("CRC mismatch: computed {computed:#06x}, received {received:#06x}")]
    CrcMismatch { computed: u16, received: u16 },

    #[error("payload size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("unknown flight mode {0:#04x} in computer control reference")]
    InvalidFlightMode(u8),
}
