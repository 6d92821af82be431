//! Audacity label file parsing into timed command events.
//!
//! Commands are authored as labels in an audio editor and exported as a
//! line-oriented text file. A command label reads
//! `<start> <end> a<code>` (e.g. `1.500000 1.500000 a2`); region labels
//! ending in `+`, `#` comments, and blank lines are structural and carry no
//! command. Anything else is a syntax error for the whole file.
//!
//! Timestamps are converted to data frame indices with
//! [`pwmpack_frame::seconds_to_frame`]; command codes are passed through as
//! raw bytes without checking them against the known command set.

pub mod error;
pub mod parse;

pub use error::{LabelError, Result};
pub use parse::{parse_labels, parse_line};
