#![forbid(unsafe_code)]

//! The duplex byte transport contract.
//!
//! The engine drives any byte-oriented duplex device: a UART, a socket, or
//! a host stdin/stdout pair in raw mode. Reads are expected to block until
//! at least one byte is available (or end of stream), then return whatever
//! is immediately ready without blocking for more. Writes may be short; the
//! output ring retains un-drained bytes and re-offers them on the next
//! flush.

use std::io;

use crate::Error;

/// A duplex byte stream.
pub trait Transport {
    /// Read available bytes into `buf`.
    ///
    /// Returns `Ok(0)` for a transient empty condition and
    /// `Err(Error::EndOfStream)` once the stream is exhausted.
    ///
    /// # Errors
    ///
    /// `Error::EndOfStream` at end of input; `Error::Transport` for
    /// host-specific failures.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error>;

    /// Write bytes from `buf`, returning how many were accepted.
    ///
    /// # Errors
    ///
    /// `Error::Transport` for host-specific failures.
    fn write(&mut self, buf: &[u8]) -> Result<usize, Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        (**self).read(buf)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, Error> {
        (**self).write(buf)
    }
}

/// Adapts a host reader/writer pair to the [`Transport`] contract.
///
/// `io::Read` reporting zero bytes is mapped to `EndOfStream` (host streams
/// signal end of input that way); `WouldBlock` and `Interrupted` are mapped
/// to the transient empty condition.
#[derive(Debug)]
pub struct StdTransport<R, W> {
    reader: R,
    writer: W,
}

impl<R: io::Read, W: io::Write> StdTransport<R, W> {
    /// Wrap a host reader/writer pair.
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Recover the wrapped pair.
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: io::Read, W: io::Write> Transport for StdTransport<R, W> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        match self.reader.read(buf) {
            Ok(0) => Err(Error::EndOfStream),
            Ok(n) => Ok(n),
            Err(e) if matches!(
                e.kind(),
                io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
            ) =>
            {
                Ok(0)
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(Error::EndOfStream),
            Err(_) => Err(Error::Transport),
        }
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, Error> {
        match self.writer.write(buf) {
            Ok(n) => {
                // Raw-mode hosts see keystrokes echo immediately.
                let _ = self.writer.flush();
                Ok(n)
            }
            Err(e) if matches!(
                e.kind(),
                io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
            ) =>
            {
                Ok(0)
            }
            Err(_) => Err(Error::Transport),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_byte_read_is_end_of_stream() {
        let mut t = StdTransport::new(io::empty(), io::sink());
        let mut buf = [0u8; 8];
        assert_eq!(t.read(&mut buf), Err(Error::EndOfStream));
    }

    #[test]
    fn reads_pass_through() {
        let mut t = StdTransport::new(&b"hi"[..], io::sink());
        let mut buf = [0u8; 8];
        assert_eq!(t.read(&mut buf), Ok(2));
        assert_eq!(&buf[..2], b"hi");
        assert_eq!(t.read(&mut buf), Err(Error::EndOfStream));
    }

    #[test]
    fn writes_pass_through() {
        let mut out = Vec::new();
        let mut t = StdTransport::new(io::empty(), &mut out);
        assert_eq!(t.write(b"ok"), Ok(2));
        drop(t);
        assert_eq!(out, b"ok");
    }
}
