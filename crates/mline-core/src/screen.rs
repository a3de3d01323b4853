#![forbid(unsafe_code)]

//! The echo surface: everything a drawing operation needs to borrow.
//!
//! Line editing mutates the rune FIFO and, when echo is on, mirrors the
//! edit onto the display by writing runes and cursor motion into the
//! output ring. A [`Screen`] bundles the three borrows those operations
//! share (the viewport, the cursor, and the OUT ring) so the `Terminal`
//! can lend them out together while keeping the line itself separately
//! borrowed.

use crate::cursor::Cursor;
use crate::display::Display;
use crate::error::keep_first;
use crate::limits::BYTES_PER_RUNE_MAX;
use crate::ring::IoBuffer;
use crate::runeview::{GlyphScanner, RuneStore, RuneView};
use crate::Error;

/// Borrowed drawing context: viewport, cursor, and the OUT ring.
#[derive(Debug)]
pub struct Screen<'a> {
    /// Viewport geometry and echo flag.
    pub display: &'a Display,
    /// Coordinate of record for the visible cursor.
    pub cursor: &'a mut Cursor,
    /// Output staging ring.
    pub out: &'a mut IoBuffer,
}

impl Screen<'_> {
    /// True when keystrokes are echoed.
    #[must_use]
    pub fn echo(&self) -> bool {
        self.display.echo()
    }

    /// Write the view's runes into the OUT ring in width-bounded chunks,
    /// advancing the cursor by each chunk's glyph count and appending an
    /// end-of-line whenever a chunk lands exactly on a row boundary.
    ///
    /// # Errors
    ///
    /// `Error::WriteOverflow` when the OUT ring fills; drawing continues
    /// past the failure and the first error kind is reported.
    pub fn put_view<S: RuneStore + ?Sized>(
        &mut self,
        view: &mut RuneView<'_, S>,
    ) -> Result<(), Error> {
        let mut first = None;
        while !view.is_empty() {
            // A resize can leave the cursor past the new width; still make
            // progress one rune at a time.
            let free = (self.display.width().saturating_sub(self.cursor.x())).max(1) as usize;
            let todo = free.min(view.len());
            let mut scanner = GlyphScanner::default();
            let mut glyphs = 0u32;
            for _ in 0..todo {
                let r = view.next();
                let mut buf = [0u8; BYTES_PER_RUNE_MAX];
                let n = r.encode_utf8(&mut buf);
                if n > 0 {
                    if let Err(e) = self.out.write(&buf[..n]) {
                        keep_first(&mut first, e);
                    }
                }
                if scanner.observe(r) {
                    glyphs += 1;
                }
            }
            if self.cursor.advance(glyphs, self.display) {
                if let Err(e) = self.out.write_eol() {
                    keep_first(&mut first, e);
                }
            }
        }
        match first {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Draw the prompt at the cursor, wrapping if it exceeds the row.
    ///
    /// # Errors
    ///
    /// `Error::WriteOverflow` when the OUT ring fills.
    pub fn show_prompt(&mut self) -> Result<(), Error> {
        if !self.display.prompt_enabled() {
            return Ok(());
        }
        let prompt = self.display.prompt();
        self.put_view(&mut RuneView::new(prompt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eol::EolMode;
    use crate::rune::Rune;

    fn runes(s: &str) -> Vec<Rune> {
        s.chars().map(Rune::from_char).collect()
    }

    fn fixture(width: u32) -> (Display, Cursor, IoBuffer) {
        let mut display = Display::new(width, 24, "> ", true);
        display.set_prompt_enabled(true);
        (display, Cursor::new(), IoBuffer::new(EolMode::CrLf))
    }

    fn drained(out: &mut IoBuffer) -> Vec<u8> {
        let mut buf = vec![0u8; out.len()];
        out.read(&mut buf);
        buf
    }

    #[test]
    fn put_view_writes_runes_and_advances() {
        let (display, mut cursor, mut out) = fixture(80);
        let mut screen = Screen {
            display: &display,
            cursor: &mut cursor,
            out: &mut out,
        };
        let store = runes("hi");
        screen.put_view(&mut RuneView::new(store.as_slice())).unwrap();
        assert_eq!(cursor.x(), 2);
        assert_eq!(drained(&mut out), b"hi");
    }

    #[test]
    fn row_boundary_appends_eol() {
        let (display, mut cursor, mut out) = fixture(4);
        let mut screen = Screen {
            display: &display,
            cursor: &mut cursor,
            out: &mut out,
        };
        let store = runes("abcd");
        screen.put_view(&mut RuneView::new(store.as_slice())).unwrap();
        assert_eq!((cursor.x(), cursor.y()), (0, 1));
        // Canonical newline in the ring; CRLF only appears on the wire.
        assert_eq!(drained(&mut out), b"abcd\n");
    }

    #[test]
    fn long_text_wraps_in_chunks() {
        let (display, mut cursor, mut out) = fixture(4);
        let mut screen = Screen {
            display: &display,
            cursor: &mut cursor,
            out: &mut out,
        };
        let store = runes("abcdefghij");
        screen.put_view(&mut RuneView::new(store.as_slice())).unwrap();
        assert_eq!((cursor.x(), cursor.y()), (2, 2));
        assert_eq!(drained(&mut out), b"abcd\nefgh\nij");
    }

    #[test]
    fn show_prompt_draws_and_advances() {
        let (display, mut cursor, mut out) = fixture(80);
        let mut screen = Screen {
            display: &display,
            cursor: &mut cursor,
            out: &mut out,
        };
        screen.show_prompt().unwrap();
        assert_eq!(cursor.x(), 2);
        assert_eq!(drained(&mut out), b"> ");
    }

    #[test]
    fn disabled_prompt_draws_nothing() {
        let mut display = Display::new(80, 24, "> ", true);
        display.set_prompt_enabled(false);
        let mut cursor = Cursor::new();
        let mut out = IoBuffer::new(EolMode::CrLf);
        let mut screen = Screen {
            display: &display,
            cursor: &mut cursor,
            out: &mut out,
        };
        screen.show_prompt().unwrap();
        assert!(out.is_empty());
    }
}
