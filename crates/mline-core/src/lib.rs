#![forbid(unsafe_code)]

//! A statically-allocated line-editing terminal engine.
//!
//! `mline-core` turns a byte-oriented duplex transport, such as a UART or
//! a host stdin/stdout pair in raw mode, into a line-buffered command-line
//! interface with cursor movement, in-place editing, bracketed paste, ANSI
//! display updates, and optional line history. Every buffer is a fixed
//! array sized at compile time (see [`limits`]); no operational path
//! allocates.
//!
//! # Pipeline
//!
//! Input bytes stage in an IN ring, a parser recognizes one key at a time,
//! and dispatch turns keys into line edits whose display echo stages in an
//! OUT ring until it drains back to the transport:
//!
//! ```text
//! transport → IN ring → key parser → dispatch ─┬─ line edits
//!                                              ├─ cursor motion ─┐
//!                                              └─ history nav    │
//! transport ← OUT ring ← line echo + EOL + ANSI sequences ←──────┘
//! ```
//!
//! # Example
//!
//! ```
//! use mline_core::{Config, StdTransport, Terminal};
//!
//! let transport = StdTransport::new(&b"hello\r"[..], Vec::new());
//! let mut terminal = Terminal::new(transport, Config::default());
//! let mut buf = [0u8; 1024];
//! let line = terminal.read_line(&mut buf)?;
//! assert_eq!(&buf[..line.len], b"hello");
//! # Ok::<(), mline_core::Error>(())
//! ```

pub mod ascii;
pub mod cursor;
pub mod display;
pub mod eol;
pub mod error;
pub mod history;
pub mod key;
pub mod key_parser;
pub mod limits;
pub mod line;
pub mod logging;
pub mod register;
pub mod ring;
pub mod rune;
pub mod runeview;
pub mod screen;
pub mod terminal;
pub mod transport;

pub use cursor::Cursor;
pub use display::Display;
pub use eol::EolMode;
pub use error::Error;
pub use history::History;
pub use line::Line;
pub use ring::IoBuffer;
pub use rune::Rune;
pub use runeview::{RuneStore, RuneView};
pub use screen::Screen;
pub use terminal::{Config, LineRead, PasteState, Terminal};
pub use transport::{StdTransport, Transport};

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace};
