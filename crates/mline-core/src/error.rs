#![forbid(unsafe_code)]

//! Engine error taxonomy.
//!
//! One flat, copyable enum: the engine is heap-free, so errors carry no
//! payload. When several failures occur inside one operation, the operation
//! keeps going with whatever it can still emit and retains only the first
//! kind observed.

/// Errors reported by engine operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A zero-length buffer was handed to an operation that requires one.
    InvalidArgument,
    /// Internal region bounds were violated; indicates a bug.
    OutOfRange,
    /// A fixed-capacity destination could not accept every byte.
    WriteOverflow,
    /// A fixed-capacity destination is full; nothing could be read into it.
    ReadOverflow,
    /// The completed line arrived entirely via bracketed paste.
    PasteIndicator,
    /// The transport has no further input.
    EndOfStream,
    /// The user pressed the interrupt key.
    Interrupted,
    /// The transport failed for a host-specific reason.
    Transport,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Error::InvalidArgument => "invalid argument",
            Error::OutOfRange => "out of range",
            Error::WriteOverflow => "write overflow",
            Error::ReadOverflow => "read overflow",
            Error::PasteIndicator => "paste indicator",
            Error::EndOfStream => "end of stream",
            Error::Interrupted => "interrupted",
            Error::Transport => "transport failure",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for Error {}

/// Retain the first error observed across a multi-step operation.
#[inline]
pub(crate) fn keep_first(slot: &mut Option<Error>, err: Error) {
    if slot.is_none() {
        *slot = Some(err);
    }
}
