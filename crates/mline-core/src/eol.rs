#![forbid(unsafe_code)]

//! End-of-line conventions.

/// End-of-line byte-sequence convention for an I/O ring.
///
/// Rings store a canonical `\n`; a ring configured `CrLf` or `Cr` translates
/// each stored `\n` into this sequence as bytes drain to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EolMode {
    /// Bare line feed, `\n`.
    Lf,
    /// Carriage return + line feed, `\r\n`.
    CrLf,
    /// Bare carriage return, `\r`.
    Cr,
}

impl EolMode {
    /// Platform alias for [`EolMode::Lf`].
    pub const UNIX: EolMode = EolMode::Lf;
    /// Platform alias for [`EolMode::CrLf`].
    pub const DOS: EolMode = EolMode::CrLf;
    /// Platform alias for [`EolMode::Cr`].
    pub const MAC: EolMode = EolMode::Cr;

    /// The byte sequence this mode writes in place of `\n`.
    #[must_use]
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            EolMode::Lf => b"\n",
            EolMode::CrLf => b"\r\n",
            EolMode::Cr => b"\r",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_sequences() {
        assert_eq!(EolMode::Lf.as_bytes(), b"\n");
        assert_eq!(EolMode::CrLf.as_bytes(), b"\r\n");
        assert_eq!(EolMode::Cr.as_bytes(), b"\r");
    }

    #[test]
    fn platform_aliases() {
        assert_eq!(EolMode::UNIX, EolMode::Lf);
        assert_eq!(EolMode::DOS, EolMode::CrLf);
        assert_eq!(EolMode::MAC, EolMode::Cr);
    }
}
