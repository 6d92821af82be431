/// Errors that can occur while encoding or writing blocks.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// A data frame payload was not exactly `PAYLOAD_SIZE` bytes.
    #[error("payload size mismatch ({size} bytes, frame payload is {expected})")]
    PayloadSizeMismatch { size: usize, expected: usize },

    /// An I/O error occurred while reading audio or writing blocks.
    #[error("block I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The output sink stopped accepting bytes mid-block.
    #[error("output sink closed (incomplete block)")]
    SinkClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
