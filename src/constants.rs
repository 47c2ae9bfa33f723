// Protocol constants for the KFly serial link

/// Size of the packet header (command byte + length byte)
pub const HEADER_SIZE: usize = 2;

/// Size of the trailing CRC-16 (little-endian)
pub const CRC_SIZE: usize = 2;

/// Minimum size of a valid packet body (header + CRC, empty payload)
pub const MIN_BODY_SIZE: usize = HEADER_SIZE + CRC_SIZE;

/// Largest payload the length byte admits once header and CRC are accounted for
pub const MAX_PAYLOAD_SIZE: usize = 251;

/// Mask selecting the command identifier from the command byte
pub const COMMAND_MASK: u8 = 0x7F;

/// Ack-request flag in the command byte (host to device only)
pub const ACK_FLAG: u8 = 0x80;

/// Number of RC input channels carried by the RC datagrams
pub const RC_INPUT_CHANNELS: usize = 16;

/// Accumulation bound of the frame decoder; oversized frames are discarded
pub const MAX_FRAME_SIZE: usize = 4096;
