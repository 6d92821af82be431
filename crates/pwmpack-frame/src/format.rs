use bytes::{BufMut, BytesMut};

use crate::error::{FrameError, Result};

/// Fixed block size of the storage medium, in bytes.
pub const BLOCK_SIZE: usize = 512;

/// Audio payload bytes per block: one byte is the command.
pub const PAYLOAD_SIZE: usize = BLOCK_SIZE - 1;

/// Playback sample rate in Hz.
pub const SAMPLE_RATE: u32 = 32_000;

/// Playback duration of one block's payload, in seconds (511/32000).
pub const FRAME_SECONDS: f64 = PAYLOAD_SIZE as f64 / SAMPLE_RATE as f64;

/// Blocks reserved for the metadata header. All zero for now.
pub const HEADER_BLOCKS: usize = 2;

/// Header size in bytes.
pub const HEADER_SIZE: usize = HEADER_BLOCKS * BLOCK_SIZE;

/// Fill byte for the terminal block payload: the unsigned 8-bit midpoint,
/// i.e. silence on the PWM output.
pub const TERMINAL_FILL: u8 = 0x80;

/// A command scheduled for a specific data frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// Zero-based index of the data frame the command rides on.
    pub frame: u64,
    /// Raw command byte, passed through from the label file unvalidated.
    pub command: u8,
}

impl Event {
    /// Create a new event.
    pub fn new(frame: u64, command: u8) -> Self {
        Self { frame, command }
    }
}

/// Convert a label timestamp to a data frame index, truncating.
pub fn seconds_to_frame(seconds: f64) -> u64 {
    (seconds / FRAME_SECONDS) as u64
}

/// Append the metadata header to `dst`: two all-zero blocks, reserved for
/// future use.
pub fn encode_header(dst: &mut BytesMut) {
    dst.reserve(HEADER_SIZE);
    dst.put_bytes(0, HEADER_SIZE);
}

/// Encode a data frame into the block format.
///
/// Block layout:
/// ```text
/// ┌──────────────┬──────────────────────────────┐
/// │ Command (1B) │ Payload (511B u8 PCM @32kHz) │
/// └──────────────┴──────────────────────────────┘
/// ```
pub fn encode_frame(command: u8, payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    if payload.len() != PAYLOAD_SIZE {
        return Err(FrameError::PayloadSizeMismatch {
            size: payload.len(),
            expected: PAYLOAD_SIZE,
        });
    }
    dst.reserve(BLOCK_SIZE);
    dst.put_u8(command);
    dst.put_slice(payload);
    Ok(())
}

/// Encode the terminal block: the given command byte followed by 511 bytes
/// of `TERMINAL_FILL` in place of audio.
pub fn encode_terminal(command: u8, dst: &mut BytesMut) {
    dst.reserve(BLOCK_SIZE);
    dst.put_u8(command);
    dst.put_bytes(TERMINAL_FILL, PAYLOAD_SIZE);
}
