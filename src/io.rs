//! Byte I/O abstraction for platform-agnostic input/output.
//!
//! The `ByteIo` trait is the only capability the editor needs from the
//! transport (UART, USB CDC, stdio, a TCP socket, ...). Reads block until a
//! byte arrives; writes receive whole batches from the
//! [`OutputBuffer`](crate::shell::OutputBuffer), which flushes before every read.

/// Platform-agnostic byte I/O trait.
pub trait ByteIo {
    /// Platform-specific error type
    type Error;

    /// Blocking byte read.
    ///
    /// Returns:
    /// - `Ok(Some(byte))` when a byte arrived
    /// - `Ok(None)` at end of input (the session is over)
    /// - `Err(Self::Error)` on I/O error
    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error>;

    /// Write a batch of bytes.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

impl<T: ByteIo + ?Sized> ByteIo for &mut T {
    type Error = T::Error;

    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        (**self).read_byte()
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).write_bytes(bytes)
    }
}
