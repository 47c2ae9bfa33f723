//! Packet body assembly and verification.
//!
//! A body is the unframed byte string between two SLIP delimiters:
//! `[cmd | len | payload[0..len] | crc_lo | crc_hi]`, where the CRC-16 is
//! computed over everything before it. The command byte carries the ack
//! request flag in its high bit; the flag participates in the CRC but not
//! in the command identity.

use crate::commands::Command;
use crate::constants::{ACK_FLAG, COMMAND_MASK, CRC_SIZE, HEADER_SIZE, MAX_PAYLOAD_SIZE, MIN_BODY_SIZE};
use crate::crc::crc16;
use crate::datagrams::TransmitDatagram;
use crate::error::KFlyError;

/// Assemble the body for `command` with an already-serialized payload.
pub(crate) fn assemble_body(
    command: Command,
    payload: &[u8],
    ack: bool,
) -> Result<Vec<u8>, KFlyError> {
    if command == Command::None {
        return Err(KFlyError::ReservedCommand);
    }
    if payload.len() > MAX_PAYLOAD_SIZE {
        return Err(KFlyError::OversizedPayload {
            size: payload.len(),
        });
    }

    let cmd_byte = (u8::from(command) & COMMAND_MASK) | if ack { ACK_FLAG } else { 0 };

    let mut body = Vec::with_capacity(HEADER_SIZE + payload.len() + CRC_SIZE);
    body.push(cmd_byte);
    body.push(payload.len() as u8);
    body.extend_from_slice(payload);

    let crc = crc16(&body);
    body.extend_from_slice(&crc.to_le_bytes());

    Ok(body)
}

/// Assemble the body carrying `datagram` under its transmit command.
pub(crate) fn assemble_datagram<T: TransmitDatagram>(
    datagram: &T,
    ack: bool,
) -> Result<Vec<u8>, KFlyError> {
    let mut payload = Vec::with_capacity(T::WIRE_SIZE);
    datagram.serialize(&mut payload);

    assemble_body(T::COMMAND, &payload, ack)
}

/// Verify a received body and split it into command and payload.
///
/// Checks run in wire order: minimum length, declared length against the
/// observed size, CRC, then the command table. The ack bit is masked off
/// before the command lookup; frames from the device never set it, but a
/// looped-back host frame may.
pub(crate) fn verify(body: &[u8]) -> Result<(Command, &[u8]), KFlyError> {
    if body.len() < MIN_BODY_SIZE {
        return Err(KFlyError::TruncatedBody(body.len()));
    }

    let declared = body[1] as usize;
    if declared + MIN_BODY_SIZE != body.len() {
        return Err(KFlyError::LengthMismatch {
            declared,
            actual: body.len() - MIN_BODY_SIZE,
        });
    }

    let crc_offset = body.len() - CRC_SIZE;
    let received = u16::from_le_bytes([body[crc_offset], body[crc_offset + 1]]);
    let computed = crc16(&body[..crc_offset]);
    if computed != received {
        return Err(KFlyError::CrcMismatch { computed, received });
    }

    let raw_command = body[0] & COMMAND_MASK;
    let command =
        Command::try_from(raw_command).map_err(|_| KFlyError::UnknownCommand(raw_command))?;

    Ok((command, &body[HEADER_SIZE..crc_offset]))
}
