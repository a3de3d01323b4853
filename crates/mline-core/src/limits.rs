#![forbid(unsafe_code)]

//! Compile-time capacities.
//!
//! Every buffer in the engine is a fixed array sized by the constants here;
//! no operational path allocates. The `small-limits` feature shrinks the
//! line and history capacities so wrap and overflow paths can be exercised
//! interactively on a host.

/// Maximum number of bytes in one UTF-8 encoded rune.
pub const BYTES_PER_RUNE_MAX: usize = 4;

/// Maximum number of runes in a line of input.
#[cfg(not(feature = "small-limits"))]
pub const RUNES_PER_LINE: usize = 256;
/// Maximum number of runes in a line of input.
#[cfg(feature = "small-limits")]
pub const RUNES_PER_LINE: usize = 8;

/// Maximum number of lines retained in history. Old lines are discarded as
/// more are added. Zero (the `history` feature disabled) turns history
/// navigation into a no-op.
#[cfg(all(feature = "history", not(feature = "small-limits")))]
pub const LINES_PER_HISTORY: usize = 32;
/// Maximum number of lines retained in history.
#[cfg(all(feature = "history", feature = "small-limits"))]
pub const LINES_PER_HISTORY: usize = 5;
/// History capacity with the `history` feature disabled.
#[cfg(not(feature = "history"))]
pub const LINES_PER_HISTORY: usize = 0;

/// Capacity in bytes of each I/O staging ring: one maximum-size line of
/// maximum-size runes.
pub const BYTES_PER_BUFFER: usize = BYTES_PER_RUNE_MAX * RUNES_PER_LINE;

/// Size of the scratch used to linearize ring bytes while recognizing one
/// key. Wide enough for every fixed-length sequence the parser knows;
/// deliberately not wide enough for arbitrary escape payloads.
pub const KEY_BYTES_MAX: usize = 8;

/// Maximum number of runes in the prompt.
pub const PROMPT_RUNES_MAX: usize = 32;

/// Default viewport width in columns.
pub const DEFAULT_WIDTH: u32 = 80;

/// Default viewport height in rows.
pub const DEFAULT_HEIGHT: u32 = 24;

/// Default user-input prompt.
pub const DEFAULT_PROMPT: &str = "> ";
