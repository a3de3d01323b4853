#![forbid(unsafe_code)]

//! Key codes.
//!
//! Keys are runes. Printable keys are their own rune; keys with no text of
//! their own (arrows, function keys, paste markers, ...) are assigned
//! codes inside the UTF-16 surrogate range `[U+D800, U+DC00)`, which no
//! well-formed UTF-8 stream can produce. Enter and Backspace keep their
//! ASCII identities so they survive bracketed paste, where bytes decode as
//! plain runes.

use crate::rune::Rune;

/// ESC, as a byte.
pub const ESC_BYTE: u8 = 0x1B;

/// Enter: carriage return, the byte raw-mode terminals send for Return.
pub const ENTER: Rune = Rune::new(0x0D);
/// Escape.
pub const ESCAPE: Rune = Rune::new(0x1B);
/// Space.
pub const SPACE: Rune = Rune::new(0x20);
/// Backspace: DEL, the byte most terminals send for the backspace key.
pub const BACKSPACE: Rune = Rune::new(0x7F);

/// First synthetic code; also the unrecognized-sequence key.
pub const UNKNOWN: Rune = Rune::new(SURROGATE_BASE);
/// Cursor up one row (history back).
pub const UP: Rune = Rune::new(SURROGATE_BASE + 1);
/// Cursor down one row (history forward).
pub const DOWN: Rune = Rune::new(SURROGATE_BASE + 2);
/// Cursor left one rune.
pub const LEFT: Rune = Rune::new(SURROGATE_BASE + 3);
/// Cursor right one rune.
pub const RIGHT: Rune = Rune::new(SURROGATE_BASE + 4);
/// Cursor left one word.
pub const ALT_LEFT: Rune = Rune::new(SURROGATE_BASE + 5);
/// Cursor right one word.
pub const ALT_RIGHT: Rune = Rune::new(SURROGATE_BASE + 6);
/// Cursor to start of line.
pub const HOME: Rune = Rune::new(SURROGATE_BASE + 7);
/// Cursor to end of line.
pub const END: Rune = Rune::new(SURROGATE_BASE + 8);
/// Insert.
pub const INSERT: Rune = Rune::new(SURROGATE_BASE + 9);
/// Delete the rune under the cursor.
pub const DELETE: Rune = Rune::new(SURROGATE_BASE + 10);
/// Page up.
pub const PAGE_UP: Rune = Rune::new(SURROGATE_BASE + 11);
/// Page down.
pub const PAGE_DOWN: Rune = Rune::new(SURROGATE_BASE + 12);
/// Erase the word left of the cursor.
pub const DELETE_WORD: Rune = Rune::new(SURROGATE_BASE + 13);
/// Erase from the cursor to the end of the line.
pub const KILL: Rune = Rune::new(SURROGATE_BASE + 14);
/// Erase from the start of the line to the cursor.
pub const KILL_PREVIOUS: Rune = Rune::new(SURROGATE_BASE + 15);
/// Clear the screen and redraw.
pub const CLEAR_SCREEN: Rune = Rune::new(SURROGATE_BASE + 16);
/// Bracketed-paste start marker.
pub const PASTE_START: Rune = Rune::new(SURROGATE_BASE + 17);
/// Bracketed-paste end marker.
pub const PASTE_END: Rune = Rune::new(SURROGATE_BASE + 18);
/// Interrupt (Ctrl-C).
pub const INTERRUPT: Rune = Rune::new(SURROGATE_BASE + 19);
/// End of input (Ctrl-D).
pub const END_OF_FILE: Rune = Rune::new(SURROGATE_BASE + 20);

/// Base of the F0..F20 block; see [`f`].
const F_BASE: u32 = SURROGATE_BASE + 21;

const SURROGATE_BASE: u32 = 0xD800;
const SURROGATE_END: u32 = SURROGATE_BASE + 0x400;

/// The function key `Fn`, for `n` in `0..=20`.
#[must_use]
pub const fn f(n: u32) -> Rune {
    Rune::new(F_BASE + n)
}

/// True iff `key` is a synthetic control code.
#[must_use]
pub const fn is_control(key: Rune) -> bool {
    let v = key.value();
    SURROGATE_BASE <= v && v < SURROGATE_END
}

/// True iff `key` is a visible key: at or above space and not a synthetic
/// control code.
#[must_use]
pub const fn is_printable(key: Rune) -> bool {
    key.value() >= SPACE.value() && !is_control(key)
}
