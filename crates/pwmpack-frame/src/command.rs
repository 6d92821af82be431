//! Built-in command bytes.
//!
//! The device executes one command byte per block. Codes not listed here are
//! reserved; the packer passes label-supplied codes through without
//! validation, so a stream may legally carry codes this version does not
//! name.

/// No action; keep playing.
pub const NONE: u8 = 0;

/// Stop playback after this block.
pub const STOP: u8 = 2;

/// Restart the track from the first data block.
pub const LOOP: u8 = 3;

/// Returns a human-readable name for a command byte.
pub fn command_name(code: u8) -> &'static str {
    match code {
        NONE => "NONE",
        STOP => "STOP",
        LOOP => "LOOP",
        _ => "RESERVED",
    }
}

/// The command carried by the terminal block.
pub fn terminal_command(loop_playback: bool) -> u8 {
    if loop_playback {
        LOOP
    } else {
        STOP
    }
}

/// Returns true if the code is one of the commands this version emits.
pub fn is_known(code: u8) -> bool {
    matches!(code, NONE | STOP | LOOP)
}
