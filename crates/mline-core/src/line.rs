#![forbid(unsafe_code)]

//! The line model: a fixed-capacity rune FIFO with a logical cursor.
//!
//! Runes live in a ring indexed by monotonic `head`/`tail` counters, like
//! the byte rings, so history snapshots are plain value copies. `position`
//! is the logical cursor: 0 sits before the first rune, `rune_count()` past
//! the last. When echo is on, every editing operation keeps the terminal's
//! picture in lock-step with the FIFO by redrawing the affected tail of the
//! line and parking the cursor back at `position`.

use crate::error::keep_first;
use crate::key;
use crate::limits::RUNES_PER_LINE;
use crate::register::Reg32;
use crate::rune::{self, Decoded, Rune};
use crate::runeview::{RuneStore, RuneView};
use crate::screen::Screen;
use crate::Error;

/// Clear the whole screen.
const CLEAR_SCREEN_SEQ: &[u8] = b"\x1b[2J";
/// Park the terminal cursor at the top-left cell.
const CURSOR_HOME_SEQ: &[u8] = b"\x1b[H";

const BLANK: [Rune; 1] = [key::SPACE];

/// A single line of input being edited.
#[derive(Debug, Clone)]
pub struct Line {
    runes: [Rune; RUNES_PER_LINE],
    position: Reg32,
    head: Reg32,
    tail: Reg32,
    pasted: bool,
}

impl Line {
    /// An empty line.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            runes: [Rune::new(0); RUNES_PER_LINE],
            position: Reg32::new(0),
            head: Reg32::new(0),
            tail: Reg32::new(0),
            pasted: false,
        }
    }

    /// Discard the contents and return the cursor to offset 0.
    pub fn reset(&mut self) {
        self.position.set(0);
        self.head.set(0);
        self.tail.set(0);
        self.pasted = false;
    }

    /// Number of runes in the line.
    #[must_use]
    pub fn rune_count(&self) -> usize {
        (self.tail.get() - self.head.get()) as usize
    }

    /// True when no further rune fits.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.rune_count() == RUNES_PER_LINE
    }

    /// The logical cursor offset, `0..=rune_count()`.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position.get() as usize
    }

    /// Move the logical cursor without touching the display.
    pub fn set_position(&mut self, pos: usize) {
        self.position.set(pos.min(self.rune_count()) as u32);
    }

    /// The rune at logical offset `i`, or [`Rune::INVALID`] past the end.
    #[must_use]
    pub fn rune(&self, i: usize) -> Rune {
        if i >= self.rune_count() {
            return Rune::INVALID;
        }
        self.runes[(self.head.get() as usize + i) % RUNES_PER_LINE]
    }

    /// UTF-8 byte length of the contents.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        RuneView::new(self).byte_len()
    }

    /// True when every rune of this line arrived via bracketed paste.
    #[must_use]
    pub fn is_pasted(&self) -> bool {
        self.pasted
    }

    /// Mark or clear the pasted-only flag.
    pub fn set_pasted(&mut self, pasted: bool) {
        self.pasted = pasted;
    }

    /// Write the contents into the OUT ring from the cursor's screen
    /// position, wrapping at the viewport width.
    pub fn flush(&self, screen: &mut Screen<'_>) -> Result<(), Error> {
        screen.put_view(&mut RuneView::new(self))
    }

    /// Move the cursor to logical offset `pos` (clamped to the contents),
    /// emitting the minimum motion when echo is on.
    pub fn move_cursor_to(&mut self, pos: usize, screen: &mut Screen<'_>) -> Result<(), Error> {
        let pos = pos.min(self.rune_count());
        self.position.set(pos as u32);
        screen.cursor.move_to(pos, screen.display, screen.out)
    }

    /// Move the cursor by a signed rune delta.
    pub fn move_cursor(&mut self, delta: isize, screen: &mut Screen<'_>) -> Result<(), Error> {
        let pos = self.position() as isize + delta;
        self.move_cursor_to(pos.max(0) as usize, screen)
    }

    /// Insert `r` at the cursor, shifting the tail right. With echo on the
    /// shifted tail is redrawn and the cursor lands after the insertion.
    ///
    /// # Errors
    ///
    /// `Error::WriteOverflow` when the line is full.
    pub fn insert_rune(&mut self, r: Rune, screen: &mut Screen<'_>) -> Result<(), Error> {
        if self.is_full() {
            return Err(Error::WriteOverflow);
        }
        let pos = self.position() as u32;
        let h = self.head.get();
        let t = self.tail.get();
        let mut i = t;
        while i > h + pos {
            self.runes[i as usize % RUNES_PER_LINE] = self.runes[(i - 1) as usize % RUNES_PER_LINE];
            i -= 1;
        }
        self.runes[(h + pos) as usize % RUNES_PER_LINE] = r;
        self.tail.set(t + 1);
        let mut first = None;
        if screen.echo() {
            // Redraw only the tail: narrow the flush window to the
            // insertion point, then restore it.
            self.head.set(h + pos);
            if let Err(e) = self.flush(screen) {
                keep_first(&mut first, e);
            }
            self.head.set(h);
            if let Err(e) = self.move_cursor_to(pos as usize + 1, screen) {
                keep_first(&mut first, e);
            }
        } else {
            self.position.set(pos + 1);
        }
        match first {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Erase up to `n` runes left of the cursor, shifting the tail left and
    /// overwriting the vacated cells with spaces on redraw. The cursor
    /// lands at `position - n`.
    pub fn erase_previous(&mut self, n: usize, screen: &mut Screen<'_>) -> Result<(), Error> {
        let pos = self.position();
        let n = n.min(pos);
        if n == 0 {
            return Ok(());
        }
        let h = self.head.get();
        let t = self.tail.get();
        for i in (h + pos as u32)..t {
            self.runes[(i - n as u32) as usize % RUNES_PER_LINE] =
                self.runes[i as usize % RUNES_PER_LINE];
        }
        for i in (t - n as u32)..t {
            self.runes[i as usize % RUNES_PER_LINE] = key::SPACE;
        }
        let mut first = None;
        if screen.echo() {
            if let Err(e) = self.move_cursor_to(pos - n, screen) {
                keep_first(&mut first, e);
            }
            // Redraw from the new cursor through the old tail so the
            // shifted text and the space padding overwrite the screen.
            self.head.set(h + (pos - n) as u32);
            if let Err(e) = self.flush(screen) {
                keep_first(&mut first, e);
            }
            self.head.set(h);
            self.tail.set(t - n as u32);
            if let Err(e) = self.move_cursor_to(pos - n, screen) {
                keep_first(&mut first, e);
            }
        } else {
            self.tail.set(t - n as u32);
            self.position.set((pos - n) as u32);
        }
        match first {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Replace the contents, leaving the cursor at the end.
    pub fn set(&mut self, runes: &[Rune], screen: &mut Screen<'_>) -> Result<(), Error> {
        self.set_with_cursor(runes, None, screen)
    }

    /// Replace the contents and park the cursor at `pos` (`None` = end).
    /// On redraw, the old tail is erased by padding with spaces out to the
    /// previous rune count.
    pub fn set_with_cursor(
        &mut self,
        runes: &[Rune],
        pos: Option<usize>,
        screen: &mut Screen<'_>,
    ) -> Result<(), Error> {
        let shown = self.rune_count();
        let count = runes.len().min(RUNES_PER_LINE);
        self.head.set(0);
        self.tail.set(0);
        self.runes[..count].copy_from_slice(&runes[..count]);
        self.tail.set(count as u32);
        let target = pos.unwrap_or(count).min(count);
        let mut first = None;
        if screen.echo() {
            if let Err(e) = screen.cursor.move_to(0, screen.display, screen.out) {
                keep_first(&mut first, e);
            }
            if let Err(e) = self.flush(screen) {
                keep_first(&mut first, e);
            }
            if let Err(e) = pad_blanks(shown.saturating_sub(count), screen) {
                keep_first(&mut first, e);
            }
            if let Err(e) = self.move_cursor_to(target, screen) {
                keep_first(&mut first, e);
            }
        } else {
            self.position.set(target as u32);
        }
        match first {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Erase the whole screen and park the terminal cursor (and the
    /// tracked coordinates) at the top-left cell. The caller redraws the
    /// prompt and contents.
    pub fn clear_screen(&mut self, screen: &mut Screen<'_>) -> Result<(), Error> {
        let mut first = None;
        if let Err(e) = screen.out.write(CLEAR_SCREEN_SEQ) {
            keep_first(&mut first, e);
        }
        if let Err(e) = screen.out.write(CURSOR_HOME_SEQ) {
            keep_first(&mut first, e);
        }
        screen.cursor.reset();
        match first {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Left-steps from `position - 1` across contiguous spaces and then a
    /// run of non-spaces. Returns 0 when the walk meets no non-space rune.
    #[must_use]
    pub fn runes_to_word_start(&self) -> usize {
        let pos = self.position();
        if pos == 0 {
            return 0;
        }
        let mut i = pos - 1;
        while i > 0 && self.rune(i) == key::SPACE {
            i -= 1;
        }
        if self.rune(i) == key::SPACE {
            return 0;
        }
        while i > 0 && self.rune(i - 1) != key::SPACE {
            i -= 1;
        }
        pos - 1 - i
    }

    /// Right-steps from `position` across a run of non-spaces and then
    /// contiguous spaces, landing at the start of the next word. Returns 0
    /// when the walk meets no further word.
    #[must_use]
    pub fn runes_to_next_word(&self) -> usize {
        let count = self.rune_count();
        let start = self.position();
        let mut i = start;
        while i < count && self.rune(i) != key::SPACE {
            i += 1;
        }
        while i < count && self.rune(i) == key::SPACE {
            i += 1;
        }
        if i == count {
            return 0;
        }
        i - start
    }

    /// Right-steps from `position` across a run of non-spaces.
    #[must_use]
    pub fn runes_to_word_end(&self) -> usize {
        let count = self.rune_count();
        let start = self.position();
        let mut i = start;
        while i < count && self.rune(i) != key::SPACE {
            i += 1;
        }
        i - start
    }

    /// Replace the contents with runes decoded from `bytes`. Malformed
    /// encodings are skipped one byte at a time; decoding stops when the
    /// line fills.
    ///
    /// # Errors
    ///
    /// The first `Error::InvalidArgument` (skipped bytes) or
    /// `Error::WriteOverflow` (full line) observed.
    pub fn write(&mut self, bytes: &[u8]) -> Result<usize, Error> {
        if bytes.is_empty() {
            return Ok(0);
        }
        self.reset();
        self.append(bytes)
    }

    /// Append runes decoded from `bytes` at the tail, with the same
    /// skip-and-continue handling as [`Line::write`].
    pub fn append(&mut self, bytes: &[u8]) -> Result<usize, Error> {
        let mut first = None;
        let mut consumed = 0;
        let h = self.head.get();
        let mut t = self.tail.get();
        let mut i = 0;
        while i < bytes.len() {
            if t - h >= RUNES_PER_LINE as u32 {
                keep_first(&mut first, Error::WriteOverflow);
                break;
            }
            match rune::decode(&bytes[i..]) {
                Decoded::Complete(r, len) => {
                    self.runes[t as usize % RUNES_PER_LINE] = r;
                    t += 1;
                    i += len;
                    consumed += len;
                }
                Decoded::Incomplete | Decoded::Invalid => {
                    keep_first(&mut first, Error::InvalidArgument);
                    i += 1;
                }
            }
        }
        self.tail.set(t);
        match first {
            Some(e) => Err(e),
            None => Ok(consumed),
        }
    }

    /// Drain the contents as UTF-8 into `buf`, returning the byte count.
    /// A call that empties the line resets it; otherwise the head advances
    /// past the drained runes.
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        let mut n = 0;
        let t = self.tail.get();
        let mut cur = self.head.get();
        while cur < t {
            let r = self.runes[cur as usize % RUNES_PER_LINE];
            let len = r.len_utf8();
            if len > buf.len() - n {
                break;
            }
            if len > 0 {
                let mut tmp = [0u8; 4];
                r.encode_utf8(&mut tmp);
                buf[n..n + len].copy_from_slice(&tmp[..len]);
                n += len;
            }
            cur += 1;
        }
        if cur == t {
            self.reset();
        } else {
            self.head.set(cur);
            let count = (t - cur) as usize;
            if self.position() > count {
                self.position.set(count as u32);
            }
        }
        n
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl RuneStore for Line {
    fn rune_at(&self, i: u32) -> Rune {
        self.runes[i as usize % RUNES_PER_LINE]
    }

    fn head(&self) -> u32 {
        self.head.get()
    }

    fn tail(&self) -> u32 {
        self.tail.get()
    }
}

/// Draw `n` spaces at the cursor, wrapping like any other text.
pub(crate) fn pad_blanks(n: usize, screen: &mut Screen<'_>) -> Result<(), Error> {
    let mut first = None;
    for _ in 0..n {
        if let Err(e) = screen.put_view(&mut RuneView::new(&BLANK[..])) {
            keep_first(&mut first, e);
        }
    }
    match first {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
