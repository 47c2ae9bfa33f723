//! SLIP framing for the KFly serial byte stream.
//!
//! Frames are delimited by `END`; `END` and `ESC` bytes inside a payload are
//! escaped with the two-byte `ESC ESC_END` / `ESC ESC_ESC` sequences. The
//! decoder is incremental: it accepts arbitrary byte chunks, tolerates
//! garbage between frames and resynchronizes on the next `END` after any
//! corruption.

use bytes::{Bytes, BytesMut};

use crate::constants::MAX_FRAME_SIZE;

/// Frame delimiter
pub const END: u8 = 0xC0;
/// Escape introducer
pub const ESC: u8 = 0xDB;
/// Escaped `END`
pub const ESC_END: u8 = 0xDC;
/// Escaped `ESC`
pub const ESC_ESC: u8 = 0xDD;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Waiting for the first delimiter; everything else is discarded.
    Idle,
    /// Inside a frame, accumulating payload bytes.
    InFrame,
    /// The previous byte was `ESC`.
    AfterEsc,
}

/// Incremental SLIP decoder.
///
/// A single decoder instance processes an unbounded stream; feed it bytes
/// with [`push`](Self::push) or [`push_byte`](Self::push_byte) and collect
/// the completed frame payloads it returns. Frames larger than
/// [`MAX_FRAME_SIZE`] and frames with invalid escape sequences are dropped
/// without notice.
#[derive(Debug)]
pub struct SlipDecoder {
    state: State,
    buf: BytesMut,
}

impl Default for SlipDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl SlipDecoder {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            buf: BytesMut::with_capacity(256),
        }
    }

    /// Feed a single byte, returning a payload if this byte completed a frame.
    pub fn push_byte(&mut self, byte: u8) -> Option<Bytes> {
        match self.state {
            State::Idle => {
                if byte == END {
                    self.buf.clear();
                    self.state = State::InFrame;
                }
                None
            }
            State::InFrame => match byte {
                END => {
                    if self.buf.is_empty() {
                        // Back-to-back delimiters; treat as a fresh frame start.
                        None
                    } else {
                        self.state = State::Idle;
                        Some(self.buf.split().freeze())
                    }
                }
                ESC => {
                    self.state = State::AfterEsc;
                    None
                }
                _ => {
                    self.accumulate(byte);
                    None
                }
            },
            State::AfterEsc => {
                match byte {
                    ESC_END => {
                        self.state = State::InFrame;
                        self.accumulate(END);
                    }
                    ESC_ESC => {
                        self.state = State::InFrame;
                        self.accumulate(ESC);
                    }
                    _ => {
                        // Invalid escape: the frame is corrupt.
                        self.discard();
                    }
                }
                None
            }
        }
    }

    /// Feed a chunk of bytes, returning every payload completed by it.
    pub fn push(&mut self, data: &[u8]) -> Vec<Bytes> {
        let mut frames = Vec::new();

        for &byte in data {
            if let Some(frame) = self.push_byte(byte) {
                frames.push(frame);
            }
        }

        frames
    }

    fn accumulate(&mut self, byte: u8) {
        if self.buf.len() >= MAX_FRAME_SIZE {
            self.discard();
        } else {
            self.buf.extend_from_slice(&[byte]);
        }
    }

    fn discard(&mut self) {
        self.buf.clear();
        self.state = State::Idle;
    }
}

/// Encode `payload` as a single SLIP frame, delimiters included.
///
/// The leading `END` flushes any line noise accumulated by the receiver
/// before this frame.
pub fn encode(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 2);

    out.push(END);
    for &byte in payload {
        match byte {
            END => {
                out.push(ESC);
                out.push(ESC_END);
            }
            ESC => {
                out.push(ESC);
                out.push(ESC_ESC);
            }
            _ => out.push(byte),
        }
    }
    out.push(END);

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let cases: Vec<Vec<u8>> = vec![
            vec![0x01],
            vec![0x01, 0x02, 0x03],
            vec![END],
            vec![ESC],
            vec![END, ESC, END, ESC],
            vec![ESC_END, ESC_ESC],
            (0..=255).collect(),
        ];

        for original in cases {
            let mut decoder = SlipDecoder::new();
            let frames = decoder.push(&encode(&original));
            assert_eq!(frames.len(), 1, "payload {:02X?}", original);
            assert_eq!(frames[0].as_ref(), original.as_slice());
        }
    }

    #[test]
    fn escapes_on_the_wire() {
        let encoded = encode(&[0x01, END, 0x02, ESC, 0x03]);
        assert_eq!(
            encoded,
            vec![END, 0x01, ESC, ESC_END, 0x02, ESC, ESC_ESC, 0x03, END]
        );
    }

    #[test]
    fn concatenated_frames() {
        let mut stream = encode(&[0xAA, 0xBB]);
        stream.extend(encode(&[0xCC]));

        let mut decoder = SlipDecoder::new();
        let frames = decoder.push(&stream);

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].as_ref(), &[0xAA, 0xBB]);
        assert_eq!(frames[1].as_ref(), &[0xCC]);
    }

    #[test]
    fn garbage_before_first_frame_is_discarded() {
        let mut stream = vec![0x13, 0x37, 0xFE];
        stream.extend(encode(&[0x42]));

        let mut decoder = SlipDecoder::new();
        let frames = decoder.push(&stream);

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].as_ref(), &[0x42]);
    }

    #[test]
    fn empty_frames_are_dropped() {
        let mut decoder = SlipDecoder::new();
        assert!(decoder.push(&[END, END, END, END]).is_empty());

        // The delimiter run still counts as a frame start.
        let frames = decoder.push(&[0x55, END]);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].as_ref(), &[0x55]);
    }

    #[test]
    fn invalid_escape_discards_frame() {
        let mut decoder = SlipDecoder::new();
        let mut stream = vec![END, 0x01, 0x02, ESC, 0x99];
        stream.extend(encode(&[0x0A, 0x0B]));

        let frames = decoder.push(&stream);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].as_ref(), &[0x0A, 0x0B]);
    }

    #[test]
    fn byte_at_a_time_matches_chunked() {
        let mut stream = encode(&[0x10, END, 0x20]);
        stream.extend(encode(&[0x30]));

        let mut chunked = SlipDecoder::new();
        let expected = chunked.push(&stream);

        let mut single = SlipDecoder::new();
        let mut collected = Vec::new();
        for &byte in &stream {
            if let Some(frame) = single.push_byte(byte) {
                collected.push(frame);
            }
        }

        assert_eq!(expected, collected);
    }

    #[test]
    fn oversized_frame_is_discarded() {
        let mut decoder = SlipDecoder::new();

        let mut stream = vec![END];
        stream.extend(std::iter::repeat(0x11).take(MAX_FRAME_SIZE + 1));
        stream.push(END);
        assert!(decoder.push(&stream).is_empty());

        // The decoder resynchronizes on the next delimiter.
        let frames = decoder.push(&encode(&[0x77]));
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].as_ref(), &[0x77]);
    }
}
