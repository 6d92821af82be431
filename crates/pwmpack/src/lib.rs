//! Pack 8-bit PCM audio and Audacity label commands into a 512-byte block
//! stream for storage-backed PWM playback devices.
//!
//! # Crate Structure
//!
//! - [`frame`] — Block format, command codes, and the audio/command
//!   multiplexer
//! - [`labels`] — Audacity label file parsing into timed command events

/// Re-export block format and multiplexer types.
pub mod frame {
    pub use pwmpack_frame::*;
}

/// Re-export label parsing types.
pub mod labels {
    pub use pwmpack_labels::*;
}
