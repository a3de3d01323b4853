#![forbid(unsafe_code)]

//! Logical cursor position and ANSI motion emission.
//!
//! The cursor tracks where the terminal's cursor sits on the viewport:
//! `(x, y)` with `y` relative to the first row of the current line, plus
//! the high-water row the line has reached. Motion is *emitted, not owned*:
//! [`Cursor::emit_move`] writes the escape sequences but never touches the
//! coordinates, because it is also used to jump to a precomputed target.
//! [`Cursor::set`] is the coordinate of record; every caller pairs the two
//! so that the post-state equals the computed target exactly once per move.

use crate::ascii::{self, DECIMAL_LEN_MAX};
use crate::display::Display;
use crate::error::keep_first;
use crate::key::ESC_BYTE;
use crate::register::Reg32;
use crate::ring::IoBuffer;
use crate::Error;

/// Viewport cursor for the line being edited.
#[derive(Debug, Clone, Default)]
pub struct Cursor {
    x: Reg32,
    y: Reg32,
    max_y: Reg32,
}

impl Cursor {
    /// A cursor at the origin.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            x: Reg32::new(0),
            y: Reg32::new(0),
            max_y: Reg32::new(0),
        }
    }

    /// Return to the origin and clear the high-water row.
    pub fn reset(&mut self) {
        self.x.set(0);
        self.y.set(0);
        self.max_y.set(0);
    }

    /// Current column.
    #[must_use]
    pub fn x(&self) -> u32 {
        self.x.get()
    }

    /// Current row, relative to the line's first row.
    #[must_use]
    pub fn y(&self) -> u32 {
        self.y.get()
    }

    /// Highest row the current line has reached.
    #[must_use]
    pub fn max_y(&self) -> u32 {
        self.max_y.get()
    }

    /// Record new coordinates, clamped to the viewport, raising the
    /// high-water row if needed. Returns the clamped coordinates.
    pub fn set(&mut self, x: u32, y: u32, display: &Display) -> (u32, u32) {
        let x = x.min(display.width() - 1);
        let y = y.min(display.height() - 1);
        self.x.set(x);
        self.y.set(y);
        if y > self.max_y.get() {
            self.max_y.set(y);
        }
        (x, y)
    }

    /// Advance the coordinates past `places` written glyphs, wrapping at
    /// the viewport width.
    ///
    /// Returns true when the post-state column is zero and at least one
    /// glyph was written: the caller must append an end-of-line so the
    /// terminal actually activates the next row (terminals hold position on
    /// the final cell of a row).
    pub fn advance(&mut self, places: u32, display: &Display) -> bool {
        let width = display.width();
        let mut x = self.x.get() + places;
        let y = self.y.get() + x / width;
        x %= width;
        self.set(x, y, display);
        places > 0 && x == 0
    }

    /// Emit motion sequences into `out` for each non-zero direction:
    /// the short form `ESC [ A..D` for one step, the parameterized form
    /// `ESC [ <n> A..D` otherwise. Coordinates are not touched.
    ///
    /// # Errors
    ///
    /// `Error::WriteOverflow` when `out` cannot hold a sequence; emission
    /// continues so the display stays as close to truth as possible, and
    /// the first failure is reported.
    pub fn emit_move(
        &self,
        out: &mut IoBuffer,
        up: u32,
        down: u32,
        left: u32,
        right: u32,
    ) -> Result<(), Error> {
        let mut first = None;
        for (places, code) in [(up, b'A'), (down, b'B'), (right, b'C'), (left, b'D')] {
            if places == 0 {
                continue;
            }
            if let Err(e) = emit_one(out, places, code) {
                keep_first(&mut first, e);
            }
        }
        match first {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Move to the screen position of logical text offset `pos`, emitting
    /// the minimum up/down/left/right motion from the current coordinates.
    /// No-op when echo is off.
    ///
    /// # Errors
    ///
    /// `Error::WriteOverflow` when `out` cannot hold the motion sequences.
    pub fn move_to(&mut self, pos: usize, display: &Display, out: &mut IoBuffer) -> Result<(), Error> {
        if !display.echo() {
            return Ok(());
        }
        let width = display.width();
        let mut x = pos as u32 + display.prompt_glyphs() as u32;
        let y = x / width;
        x %= width;
        let cx = self.x.get();
        let cy = self.y.get();
        let up = cy.saturating_sub(y);
        let down = y.saturating_sub(cy);
        let left = cx.saturating_sub(x);
        let right = x.saturating_sub(cx);
        self.set(x, y, display);
        self.emit_move(out, up, down, left, right)
    }
}

fn emit_one(out: &mut IoBuffer, places: u32, code: u8) -> Result<(), Error> {
    out.write_byte(ESC_BYTE)?;
    out.write_byte(b'[')?;
    if places > 1 {
        let mut digits = [0u8; DECIMAL_LEN_MAX];
        out.write(ascii::encode_u32(places, &mut digits))?;
    }
    out.write_byte(code)?;
    Ok(())
}
