#![forbid(unsafe_code)]

//! The history ring: committed-line snapshots plus the pending line.
//!
//! Snapshots are value copies of [`Line`]; the rune arrays are owned, so a
//! later edit of the pending line never disturbs a stored one. Browsing
//! *swaps* the pending line with the slot at the browse offset: whatever
//! was being typed is parked in the slot while its prior content becomes
//! the editable pending line, and moving the other way swaps them back.
//!
//! With the `history` feature disabled the snapshot array is zero-length,
//! `add` discards, and navigation is a no-op.

use core::mem;

use crate::limits::LINES_PER_HISTORY;
use crate::line::{pad_blanks, Line};
use crate::register::Reg32;
use crate::screen::Screen;
use crate::Error;

/// Modulus that stays non-zero when history is compiled out.
const SLOTS: usize = if LINES_PER_HISTORY == 0 {
    1
} else {
    LINES_PER_HISTORY
};

/// Ring of committed [`Line`] snapshots and the live pending line.
#[derive(Debug, Clone)]
pub struct History {
    lines: [Line; LINES_PER_HISTORY],
    pending: Line,
    head: Reg32,
    size: Reg32,
    index: Reg32,
}

impl History {
    /// An empty history with an empty pending line.
    #[must_use]
    pub fn new() -> Self {
        const EMPTY: Line = Line::new();
        Self {
            lines: [EMPTY; LINES_PER_HISTORY],
            pending: Line::new(),
            head: Reg32::new(0),
            size: Reg32::new(0),
            index: Reg32::new(0),
        }
    }

    /// Number of stored snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size.get() as usize
    }

    /// True when no snapshot is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size.get() == 0
    }

    /// Current browse offset; 0 means the pending line is the live one.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index.get() as usize
    }

    /// The line currently being edited.
    #[must_use]
    pub fn line(&self) -> &Line {
        &self.pending
    }

    /// Mutable access to the line currently being edited.
    pub fn line_mut(&mut self) -> &mut Line {
        &mut self.pending
    }

    /// Snapshot the pending line as the most recent entry, discarding the
    /// oldest once the ring is full, and rewind browsing to the pending
    /// line. The pending line itself is left untouched.
    pub fn add(&mut self) {
        if LINES_PER_HISTORY == 0 {
            return;
        }
        let head = (self.head.get() as usize + 1) % SLOTS;
        self.head.set(head as u32);
        self.lines[head] = self.pending.clone();
        let size = self.size.get();
        if (size as usize) < LINES_PER_HISTORY {
            self.size.set(size + 1);
        }
        self.index.set(0);
    }

    /// The `n`-th previous snapshot: 0 is the most recently added.
    #[must_use]
    pub fn get(&self, n: usize) -> Option<&Line> {
        if n >= self.len() {
            return None;
        }
        let slot = (self.head.get() as usize + SLOTS - n) % SLOTS;
        Some(&self.lines[slot])
    }

    /// Browse one step back: swap the pending line with the next-older
    /// snapshot and redraw it, cursor at its stored position.
    pub fn back(&mut self, screen: &mut Screen<'_>) -> Result<(), Error> {
        if self.index.get() >= self.size.get() {
            return Ok(());
        }
        let slot = (self.head.get() as usize + SLOTS - self.index.get() as usize) % SLOTS;
        self.index.set(self.index.get() + 1);
        self.swap_and_redraw(slot, screen)
    }

    /// Browse one step forward: swap the pending line with the next-newer
    /// entry (ultimately the interrupted pending text) and redraw it.
    pub fn forward(&mut self, screen: &mut Screen<'_>) -> Result<(), Error> {
        if self.index.get() == 0 {
            return Ok(());
        }
        self.index.set(self.index.get() - 1);
        let slot = (self.head.get() as usize + SLOTS - self.index.get() as usize) % SLOTS;
        self.swap_and_redraw(slot, screen)
    }

    fn swap_and_redraw(&mut self, slot: usize, screen: &mut Screen<'_>) -> Result<(), Error> {
        let shown = self.pending.rune_count();
        mem::swap(&mut self.pending, &mut self.lines[slot]);
        let target = self.pending.position().min(self.pending.rune_count());
        if !screen.echo() {
            self.pending.set_position(target);
            return Ok(());
        }
        let mut first = None;
        if let Err(e) = screen.cursor.move_to(0, screen.display, screen.out) {
            crate::error::keep_first(&mut first, e);
        }
        if let Err(e) = self.pending.flush(screen) {
            crate::error::keep_first(&mut first, e);
        }
        let count = self.pending.rune_count();
        if let Err(e) = pad_blanks(shown.saturating_sub(count), screen) {
            crate::error::keep_first(&mut first, e);
        }
        if let Err(e) = self.pending.move_cursor_to(target, screen) {
            crate::error::keep_first(&mut first, e);
        }
        match first {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Cursor;
    use crate::display::Display;
    use crate::eol::EolMode;
    use crate::ring::IoBuffer;
    use crate::rune::Rune;

    struct Fixture {
        display: Display,
        cursor: Cursor,
        out: IoBuffer,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                display: Display::new(80, 24, "> ", true),
                cursor: Cursor::new(),
                out: IoBuffer::new(EolMode::CrLf),
            }
        }

        fn screen(&mut self) -> Screen<'_> {
            Screen {
                display: &self.display,
                cursor: &mut self.cursor,
                out: &mut self.out,
            }
        }
    }

    fn text(line: &Line) -> String {
        (0..line.rune_count())
            .map(|i| char::from_u32(line.rune(i).value()).unwrap())
            .collect()
    }

    fn commit(history: &mut History, fx: &mut Fixture, s: &str) {
        let runes: Vec<Rune> = s.chars().map(Rune::from_char).collect();
        history.line_mut().set(&runes, &mut fx.screen()).unwrap();
        history.add();
        history.line_mut().reset();
        fx.cursor.reset();
        let mut sink = vec![0u8; fx.out.len()];
        fx.out.read(&mut sink);
    }

    #[cfg(feature = "history")]
    #[test]
    fn add_and_get_walk_backwards() {
        let mut fx = Fixture::new();
        let mut history = History::new();
        for s in ["one", "two", "three"] {
            commit(&mut history, &mut fx, s);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(text(history.get(0).unwrap()), "three");
        assert_eq!(text(history.get(1).unwrap()), "two");
        assert_eq!(text(history.get(2).unwrap()), "one");
        assert!(history.get(3).is_none());
    }

    #[cfg(feature = "history")]
    #[test]
    fn capacity_discards_the_oldest() {
        let mut fx = Fixture::new();
        let mut history = History::new();
        for i in 0..(LINES_PER_HISTORY + 2) {
            commit(&mut history, &mut fx, &format!("line{i}"));
        }
        assert_eq!(history.len(), LINES_PER_HISTORY);
        assert_eq!(text(history.get(0).unwrap()), format!("line{}", LINES_PER_HISTORY + 1));
        assert_eq!(
            text(history.get(LINES_PER_HISTORY - 1).unwrap()),
            "line2"
        );
    }

    #[cfg(feature = "history")]
    #[test]
    fn browse_swaps_through_and_back() {
        let mut fx = Fixture::new();
        let mut history = History::new();
        for s in ["one", "two", "three"] {
            commit(&mut history, &mut fx, s);
        }
        history.back(&mut fx.screen()).unwrap();
        assert_eq!(text(history.line()), "three");
        history.back(&mut fx.screen()).unwrap();
        assert_eq!(text(history.line()), "two");
        history.back(&mut fx.screen()).unwrap();
        assert_eq!(text(history.line()), "one");
        // Nothing older: stay put.
        history.back(&mut fx.screen()).unwrap();
        assert_eq!(text(history.line()), "one");
        history.forward(&mut fx.screen()).unwrap();
        assert_eq!(text(history.line()), "two");
        history.forward(&mut fx.screen()).unwrap();
        assert_eq!(text(history.line()), "three");
        assert_eq!(history.index(), 1);
    }

    #[cfg(feature = "history")]
    #[test]
    fn snapshots_are_isolated_from_later_edits() {
        let mut fx = Fixture::new();
        let mut history = History::new();
        commit(&mut history, &mut fx, "keep");
        let runes: Vec<Rune> = "edit".chars().map(Rune::from_char).collect();
        history.line_mut().set(&runes, &mut fx.screen()).unwrap();
        assert_eq!(text(history.get(0).unwrap()), "keep");
    }

    #[cfg(feature = "history")]
    #[test]
    fn browsing_an_empty_history_is_a_no_op() {
        let mut fx = Fixture::new();
        let mut history = History::new();
        history.back(&mut fx.screen()).unwrap();
        history.forward(&mut fx.screen()).unwrap();
        assert_eq!(history.len(), 0);
        assert_eq!(history.index(), 0);
    }

    #[cfg(not(feature = "history"))]
    #[test]
    fn disabled_history_discards_everything() {
        let mut fx = Fixture::new();
        let mut history = History::new();
        commit(&mut history, &mut fx, "gone");
        assert_eq!(history.len(), 0);
        assert!(history.get(0).is_none());
        history.back(&mut fx.screen()).unwrap();
        assert_eq!(text(history.line()), "");
    }
}
