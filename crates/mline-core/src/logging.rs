#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature enabled the crate root re-exports the
//! `tracing` macros; without it, the no-op macros below take their place.
//! Call sites stay unconditional either way, and embedded builds carry no
//! logging dependency.

#[cfg(not(feature = "tracing"))]
mod noop {
    /// No-op `debug!` when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op `trace!` when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
}
