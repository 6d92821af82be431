/// Errors that can occur while parsing a label file.
///
/// All variants abort the whole file; there is no skip-and-continue. Line
/// numbers are 1-based.
#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    /// The line matches none of the recognized label grammars.
    #[error("syntax error at line {line}")]
    Syntax { line: usize },

    /// A matched start timestamp failed numeric conversion.
    #[error("invalid timestamp at line {line}")]
    InvalidTimestamp { line: usize },

    /// A matched command code does not fit in a command byte.
    #[error("invalid command code at line {line} (must be 0-255)")]
    InvalidCommand { line: usize },

    /// An I/O error occurred while reading the label file.
    #[error("label I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LabelError>;
