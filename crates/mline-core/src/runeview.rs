#![forbid(unsafe_code)]

//! Slice-and-scan views over rune containers.
//!
//! A [`RuneView`] walks any [`RuneStore`] (the line FIFO, the prompt, or a
//! plain rune slice) between its head and tail, and can be narrowed to a
//! sub-range. It computes the encoded byte length and the *glyph* count:
//! the number of runes that are not inside an ESC-opened escape sequence.

use crate::key;
use crate::rune::Rune;
use crate::Error;

/// A rune container addressable by monotonic index.
///
/// `head` and `tail` are unbounded counters; `rune_at` receives the raw
/// counter value and the implementation applies whatever physical wrapping
/// its storage needs.
pub trait RuneStore {
    /// The rune stored at monotonic index `i`.
    fn rune_at(&self, i: u32) -> Rune;
    /// Monotonic index of the first live rune.
    fn head(&self) -> u32;
    /// Monotonic index one past the last live rune.
    fn tail(&self) -> u32;
}

impl RuneStore for [Rune] {
    fn rune_at(&self, i: u32) -> Rune {
        self.get(i as usize).copied().unwrap_or(Rune::INVALID)
    }

    fn head(&self) -> u32 {
        0
    }

    fn tail(&self) -> u32 {
        self.len() as u32
    }
}

/// Tracks whether a scan position is inside an ESC-opened escape sequence.
///
/// The classification only holds when the scan starts at the beginning of
/// the logical text: a scan that begins mid-sequence counts the remaining
/// sequence runes as glyphs, because nothing marks them otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct GlyphScanner {
    in_escape: bool,
}

impl GlyphScanner {
    /// Observe the next rune; true iff it contributes a visible glyph.
    pub(crate) fn observe(&mut self, r: Rune) -> bool {
        if self.in_escape {
            // [A-Za-z] terminates the sequence; the terminator is unseen.
            let v = r.value();
            self.in_escape = !(v >= u32::from(b'a') && v <= u32::from(b'z')
                || v >= u32::from(b'A') && v <= u32::from(b'Z'));
            false
        } else if r == key::ESCAPE {
            self.in_escape = true;
            false
        } else {
            true
        }
    }
}

/// A borrowed scan window over a [`RuneStore`].
#[derive(Debug, Clone, Copy)]
pub struct RuneView<'a, S: RuneStore + ?Sized> {
    store: &'a S,
    pos: u32,
    end: u32,
}

impl<'a, S: RuneStore + ?Sized> RuneView<'a, S> {
    /// View the store's full `[head, tail)` range.
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            pos: store.head(),
            end: store.tail(),
        }
    }

    /// Restore the view to the store's full range.
    pub fn reset(&mut self) {
        self.pos = self.store.head();
        self.end = self.store.tail();
    }

    /// Narrow the view to `[head+lo, head+hi)` of the store's full range.
    ///
    /// `None` leaves the corresponding boundary at the store bound. An
    /// empty store or an out-of-order range leaves the view untouched.
    pub fn slice(&mut self, lo: Option<u32>, hi: Option<u32>) -> Result<(), Error> {
        let head = self.store.head();
        let tail = self.store.tail();
        let len = tail - head;
        if len == 0 {
            return Err(Error::OutOfRange);
        }
        let lo = lo.unwrap_or(0);
        let hi = hi.unwrap_or(len);
        if lo >= hi || hi > len {
            return Err(Error::OutOfRange);
        }
        self.pos = head + lo;
        self.end = head + hi;
        Ok(())
    }

    /// Number of runes remaining in the view.
    #[must_use]
    pub fn len(&self) -> usize {
        (self.end - self.pos) as usize
    }

    /// True when no runes remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pos == self.end
    }

    /// Pop the next rune; [`Rune::INVALID`] once the view is exhausted.
    pub fn next(&mut self) -> Rune {
        if self.pos == self.end {
            return Rune::INVALID;
        }
        let r = self.store.rune_at(self.pos);
        self.pos += 1;
        r
    }

    /// Total UTF-8 byte length of the remaining runes. Non-destructive;
    /// runes without a valid encoding contribute 0.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        let mut n = 0;
        for i in self.pos..self.end {
            n += self.store.rune_at(i).len_utf8();
        }
        n
    }

    /// Number of visible glyphs among the remaining runes: runes outside
    /// any ESC-opened escape sequence. Non-destructive; stops at the first
    /// invalid rune.
    #[must_use]
    pub fn glyph_count(&self) -> usize {
        let mut scanner = GlyphScanner::default();
        let mut count = 0;
        for i in self.pos..self.end {
            let r = self.store.rune_at(i);
            if r == Rune::INVALID {
                break;
            }
            if scanner.observe(r) {
                count += 1;
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runes(s: &str) -> Vec<Rune> {
        s.chars().map(Rune::from_char).collect()
    }

    #[test]
    fn full_view_walks_every_rune() {
        let store = runes("abc");
        let mut view = RuneView::new(store.as_slice());
        assert_eq!(view.len(), 3);
        assert_eq!(view.next(), Rune::from_char('a'));
        assert_eq!(view.next(), Rune::from_char('b'));
        assert_eq!(view.next(), Rune::from_char('c'));
        assert_eq!(view.next(), Rune::INVALID);
        assert_eq!(view.next(), Rune::INVALID);
    }

    #[test]
    fn slice_narrows_and_reset_restores() {
        let store = runes("abcdef");
        let mut view = RuneView::new(store.as_slice());
        view.slice(Some(2), Some(4)).unwrap();
        assert_eq!(view.next(), Rune::from_char('c'));
        assert_eq!(view.next(), Rune::from_char('d'));
        assert_eq!(view.next(), Rune::INVALID);
        view.reset();
        assert_eq!(view.len(), 6);
    }

    #[test]
    fn open_boundaries_stay_at_store_bounds() {
        let store = runes("abcd");
        let mut view = RuneView::new(store.as_slice());
        view.slice(Some(1), None).unwrap();
        assert_eq!(view.len(), 3);
        view.slice(None, Some(2)).unwrap();
        assert_eq!(view.len(), 2);
        assert_eq!(view.next(), Rune::from_char('a'));
    }

    #[test]
    fn bad_ranges_leave_the_view_untouched() {
        let store = runes("abcd");
        let mut view = RuneView::new(store.as_slice());
        assert_eq!(view.slice(Some(3), Some(2)), Err(Error::OutOfRange));
        assert_eq!(view.slice(Some(0), Some(9)), Err(Error::OutOfRange));
        assert_eq!(view.len(), 4);
    }

    #[test]
    fn byte_len_sums_utf8_lengths() {
        let store = runes("aé☃");
        let view = RuneView::new(store.as_slice());
        assert_eq!(view.byte_len(), 1 + 2 + 3);
        // Non-destructive.
        assert_eq!(view.byte_len(), 6);
    }

    #[test]
    fn glyphs_exclude_escape_sequences() {
        // "Hlo" ESC "[2D" "el": the four sequence runes are invisible.
        let mut store = runes("Hlo");
        store.push(key::ESCAPE);
        store.extend(runes("[2Del"));
        let view = RuneView::new(store.as_slice());
        assert_eq!(view.glyph_count(), 5);
    }

    #[test]
    fn glyphs_in_a_misaligned_slice_overcount() {
        // Slicing into the middle of the sequence loses the ESC marker, so
        // the trailing sequence runes read as ordinary text.
        let mut store = runes("Hlo");
        store.push(key::ESCAPE);
        store.extend(runes("[2Del"));
        let mut view = RuneView::new(store.as_slice());
        view.slice(Some(5), None).unwrap();
        assert_eq!(view.glyph_count(), 4);
    }

    #[test]
    fn escape_terminated_by_letter_resumes_counting() {
        let mut store = vec![key::ESCAPE];
        store.extend(runes("[10Cxy"));
        let view = RuneView::new(store.as_slice());
        assert_eq!(view.glyph_count(), 2);
    }
}
