//! Property-based invariants for the byte ring, the key parser, and glyph
//! counting.
//!
//! 1. `len + free == capacity` across arbitrary operation interleavings.
//! 2. Fill-then-drain round-trips any payload up to capacity.
//! 3. The parser never consumes bytes when it reports nothing, and
//!    consumes exactly the reported count otherwise.
//! 4. Glyph counting agrees with a straightforward reference scan.
//! 5. Line insert/erase preserve the head/tail/position invariants.

use mline_core::limits::{BYTES_PER_BUFFER, RUNES_PER_LINE};
use mline_core::{key_parser, EolMode, IoBuffer, Rune, RuneView};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum RingOp {
    Write(Vec<u8>),
    ReadInto(usize),
    Byte(u8),
    ReadByte,
}

fn ring_op_strategy() -> impl Strategy<Value = RingOp> {
    prop_oneof![
        proptest::collection::vec(any::<u8>(), 0..200).prop_map(RingOp::Write),
        (0usize..300).prop_map(RingOp::ReadInto),
        any::<u8>().prop_map(RingOp::Byte),
        Just(RingOp::ReadByte),
    ]
}

fn rune_strategy() -> impl Strategy<Value = Rune> {
    prop_oneof![
        // Plain text, including ESC and the sequence-terminator range.
        (0x09u32..0x7F).prop_map(Rune::new),
        // Multibyte scalar values.
        (0x80u32..0x2FFF).prop_map(Rune::new),
        // Surrogate-range synthetic codes.
        (0xD800u32..0xDC00).prop_map(Rune::new),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. len + free == capacity under arbitrary interleavings
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ring_len_free_sum_is_invariant(ops in proptest::collection::vec(ring_op_strategy(), 0..40)) {
        let mut ring = IoBuffer::new(EolMode::Lf);
        for op in ops {
            match op {
                RingOp::Write(bytes) => {
                    let _ = ring.write(&bytes);
                }
                RingOp::ReadInto(n) => {
                    let mut buf = vec![0u8; n];
                    let _ = ring.read(&mut buf);
                }
                RingOp::Byte(b) => {
                    let _ = ring.write_byte(b);
                }
                RingOp::ReadByte => {
                    let _ = ring.read_byte();
                }
            }
            prop_assert_eq!(ring.len() + ring.free(), BYTES_PER_BUFFER);
            prop_assert!(ring.len() <= BYTES_PER_BUFFER);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Fill-then-drain round-trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ring_round_trips_any_payload(payload in proptest::collection::vec(any::<u8>(), 0..=BYTES_PER_BUFFER)) {
        let mut ring = IoBuffer::new(EolMode::Lf);
        ring.write(&payload).unwrap();
        let mut out = vec![0u8; BYTES_PER_BUFFER];
        let n = ring.read(&mut out);
        prop_assert_eq!(&out[..n], payload.as_slice());
        prop_assert!(ring.is_empty());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Parser consume contract
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn parser_never_partially_consumes(soup in proptest::collection::vec(any::<u8>(), 0..64), pasting in any::<bool>()) {
        let mut ring = IoBuffer::new(EolMode::Lf);
        let _ = ring.write(&soup);
        loop {
            let before = ring.len();
            match key_parser::parse(&mut ring, pasting) {
                None => {
                    prop_assert_eq!(ring.len(), before);
                    break;
                }
                Some((_, n)) => {
                    prop_assert!(n > 0);
                    prop_assert_eq!(ring.len(), before - n);
                }
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Glyph counting agrees with a reference scan
// ═════════════════════════════════════════════════════════════════════════

fn reference_glyphs(runes: &[Rune]) -> usize {
    let mut escape = false;
    let mut count = 0;
    for r in runes {
        let v = r.value();
        if escape {
            escape = !(v >= u32::from(b'a') && v <= u32::from(b'z')
                || v >= u32::from(b'A') && v <= u32::from(b'Z'));
        } else if v == 0x1B {
            escape = true;
        } else {
            count += 1;
        }
    }
    count
}

proptest! {
    #[test]
    fn glyph_count_matches_reference(runes in proptest::collection::vec(rune_strategy(), 0..80)) {
        let view = RuneView::new(runes.as_slice());
        prop_assert_eq!(view.glyph_count(), reference_glyphs(&runes));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Line editing invariants
// ═════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
enum EditOp {
    Insert(char),
    Erase(usize),
    MoveTo(usize),
}

fn edit_op_strategy() -> impl Strategy<Value = EditOp> {
    prop_oneof![
        proptest::char::range('a', 'z').prop_map(EditOp::Insert),
        (0usize..6).prop_map(EditOp::Erase),
        (0usize..300).prop_map(EditOp::MoveTo),
    ]
}

proptest! {
    #[test]
    fn line_invariants_hold_under_random_edits(ops in proptest::collection::vec(edit_op_strategy(), 0..60)) {
        use mline_core::{Cursor, Display, Line, Screen};
        let display = Display::new(80, 24, "", false);
        let mut cursor = Cursor::new();
        let mut out = IoBuffer::new(EolMode::CrLf);
        let mut line = Line::new();
        let mut model: Vec<char> = Vec::new();
        let mut pos = 0usize;
        for op in ops {
            let mut screen = Screen { display: &display, cursor: &mut cursor, out: &mut out };
            match op {
                EditOp::Insert(c) => {
                    if model.len() < RUNES_PER_LINE {
                        line.insert_rune(Rune::from_char(c), &mut screen).unwrap();
                        model.insert(pos, c);
                        pos += 1;
                    }
                }
                EditOp::Erase(n) => {
                    line.erase_previous(n, &mut screen).unwrap();
                    let n = n.min(pos);
                    model.drain(pos - n..pos);
                    pos -= n;
                }
                EditOp::MoveTo(p) => {
                    line.move_cursor_to(p, &mut screen).unwrap();
                    pos = p.min(model.len());
                }
            }
            prop_assert_eq!(line.rune_count(), model.len());
            prop_assert_eq!(line.position(), pos);
            prop_assert!(line.position() <= line.rune_count());
            for (i, &c) in model.iter().enumerate() {
                prop_assert_eq!(line.rune(i), Rune::from_char(c));
            }
        }
    }
}
