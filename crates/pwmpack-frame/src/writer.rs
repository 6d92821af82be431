use std::io::{ErrorKind, Write};

use bytes::BytesMut;

use crate::error::{FrameError, Result};
use crate::format::{encode_frame, encode_header, encode_terminal, BLOCK_SIZE};

/// Writes whole blocks to any `Write` sink.
///
/// Each call stages one block (or the header) in an internal buffer and
/// drains it completely before returning, so the sink never sees a partial
/// block boundary from this writer.
pub struct BlockWriter<T> {
    inner: T,
    buf: BytesMut,
    bytes_written: u64,
}

impl<T: Write> BlockWriter<T> {
    /// Create a new block writer.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(BLOCK_SIZE),
            bytes_written: 0,
        }
    }

    /// Write the two-block all-zero metadata header.
    pub fn write_header(&mut self) -> Result<()> {
        self.buf.clear();
        encode_header(&mut self.buf);
        self.drain_buf()
    }

    /// Write one data frame: command byte plus exactly 511 payload bytes.
    pub fn write_frame(&mut self, command: u8, payload: &[u8]) -> Result<()> {
        self.buf.clear();
        encode_frame(command, payload, &mut self.buf)?;
        self.drain_buf()
    }

    /// Write the terminal block carrying the given command.
    pub fn write_terminal(&mut self, command: u8) -> Result<()> {
        self.buf.clear();
        encode_terminal(command, &mut self.buf);
        self.drain_buf()
    }

    fn drain_buf(&mut self) -> Result<()> {
        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(FrameError::SinkClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
        self.bytes_written += self.buf.len() as u64;
        Ok(())
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    /// Total bytes accepted by the sink so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Borrow the underlying sink.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying sink.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner sink.
    pub fn into_inner(self) -> T {
        self.inner
    }
}
