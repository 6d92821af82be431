//! 512-byte block format and command/audio multiplexer for PWM playback devices.
//!
//! The playback device reads fixed 512-byte blocks from storage and executes
//! one embedded control byte per block. Every block is:
//! - 1 command byte (`NONE`, `STOP`, `LOOP`)
//! - 511 bytes of unsigned 8-bit PCM payload at 32 kHz
//!
//! The stream starts with a two-block all-zero metadata header and ends with
//! a terminal block whose payload is the midpoint sample `0x80` instead of
//! audio.

pub mod command;
pub mod error;
pub mod format;
pub mod mux;
pub mod writer;

pub use command::{command_name, terminal_command, LOOP, NONE, STOP};
pub use error::{FrameError, Result};
pub use format::{
    encode_frame, encode_header, encode_terminal, seconds_to_frame, Event, BLOCK_SIZE,
    FRAME_SECONDS, HEADER_BLOCKS, HEADER_SIZE, PAYLOAD_SIZE, SAMPLE_RATE, TERMINAL_FILL,
};
pub use mux::{mux, MuxSummary};
pub use writer::BlockWriter;
