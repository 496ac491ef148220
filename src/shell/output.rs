//! Batched terminal output.
//!
//! Echo, redraw sequences, help text and handler output all accumulate here
//! and reach the transport in one `write_bytes()` call per flush. The editor
//! flushes before every blocking read, so a user never waits on output that
//! is still sitting in memory.

use crate::io::ByteIo;
use alloc::vec::Vec;
use core::fmt;

/// Bell character.
pub const BELL: u8 = 0x07;

/// Growable output buffer.
///
/// Growth doubles the current capacity. If an allocation fails the byte is
/// dropped; output is best effort and never an error.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    buf: Vec<u8>,
    increment: usize,
}

impl OutputBuffer {
    /// Create an empty buffer that reserves `increment` bytes on first use.
    pub fn new(increment: usize) -> Self {
        Self {
            buf: Vec::new(),
            increment: increment.max(1),
        }
    }

    /// Append one byte.
    pub fn put(&mut self, b: u8) {
        if self.buf.len() == self.buf.capacity() {
            let extra = self.buf.capacity().max(self.increment);
            if self.buf.try_reserve(extra).is_err() {
                log::warn!("output buffer: growth by {} failed, byte dropped", extra);
                return;
            }
        }
        self.buf.push(b);
    }

    /// Append a byte slice.
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.put(b);
        }
    }

    /// Append a string.
    pub fn put_str(&mut self, s: &str) {
        self.put_bytes(s.as_bytes());
    }

    /// Append `n` copies of `b`.
    pub fn put_n(&mut self, b: u8, n: usize) {
        for _ in 0..n {
            self.put(b);
        }
    }

    /// Move the terminal cursor back `n` columns.
    pub fn back_n(&mut self, n: usize) {
        self.put_n(b'\x08', n);
    }

    /// Ring the terminal bell.
    pub fn bell(&mut self) {
        self.put(BELL);
    }

    /// Write everything accumulated so far and empty the buffer.
    pub fn flush<IO: ByteIo>(&mut self, io: &mut IO) -> Result<(), IO::Error> {
        if !self.buf.is_empty() {
            let result = io.write_bytes(&self.buf);
            self.buf.clear();
            result?;
        }
        Ok(())
    }

    /// Bytes waiting to be flushed.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Number of bytes waiting to be flushed.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Discard pending output.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

impl fmt::Write for OutputBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.put_str(s);
        Ok(())
    }
}
