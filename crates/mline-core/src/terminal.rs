#![forbid(unsafe_code)]

//! The terminal: wiring, the read-line loop, and key dispatch.
//!
//! A [`Terminal`] owns the IN and OUT staging rings, the viewport, the
//! cursor, the history (whose pending slot is the line being edited), and
//! the bracketed-paste state, and borrows a duplex [`Transport`].
//! [`Terminal::read_line`] pumps the pipeline: refill IN from the
//! transport, recognize one key at a time, dispatch it into line edits
//! (which stage their display echo in OUT), and drain OUT back to the
//! transport, strictly in arrival order, so a flush between keys always
//! shows a causally consistent picture.

use crate::cursor::Cursor;
use crate::display::Display;
use crate::eol::EolMode;
use crate::error::keep_first;
use crate::history::History;
use crate::key;
use crate::key_parser;
use crate::limits::{
    BYTES_PER_BUFFER, DEFAULT_HEIGHT, DEFAULT_PROMPT, DEFAULT_WIDTH, RUNES_PER_LINE,
};
use crate::line::Line;
use crate::ring::IoBuffer;
use crate::rune::Rune;
use crate::screen::Screen;
use crate::transport::Transport;
use crate::Error;
use crate::{debug, trace};

/// Bracketed-paste state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasteState {
    /// Between the start and end paste markers: keys insert literally.
    Active,
    /// Ordinary typing.
    #[default]
    Inactive,
}

/// Terminal construction parameters.
///
/// Capacities are compile-time (see [`crate::limits`]); everything
/// runtime-tunable lives here. Construction is infallible: out-of-range
/// dimensions are clamped, and an oversized prompt is truncated.
#[derive(Debug, Clone)]
pub struct Config<'a> {
    /// Viewport width in columns.
    pub width: u32,
    /// Viewport height in rows.
    pub height: u32,
    /// Prompt drawn ahead of the line.
    pub prompt: &'a str,
    /// Echo keystrokes back to the display.
    pub echo: bool,
    /// Drain OUT to the transport after every dispatched key, rather than
    /// only between IN refills.
    pub auto_flush: bool,
    /// End-of-line convention of the IN ring.
    pub eol_in: EolMode,
    /// End-of-line convention of the OUT ring.
    pub eol_out: EolMode,
}

impl Default for Config<'_> {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            prompt: DEFAULT_PROMPT,
            echo: true,
            auto_flush: true,
            eol_in: EolMode::Lf,
            eol_out: EolMode::CrLf,
        }
    }
}

/// Outcome of a completed [`Terminal::read_line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRead {
    /// Number of UTF-8 bytes copied into the caller's buffer.
    pub len: usize,
    /// True when every rune of the line arrived via bracketed paste.
    pub pasted: bool,
}

/// A line-buffered command-line interface over a byte transport.
#[derive(Debug)]
pub struct Terminal<T: Transport> {
    transport: T,
    display: Display,
    cursor: Cursor,
    history: History,
    input: IoBuffer,
    output: IoBuffer,
    paste: PasteState,
    auto_flush: bool,
}

impl<T: Transport> Terminal<T> {
    /// Wire a terminal over `transport`.
    pub fn new(transport: T, config: Config<'_>) -> Self {
        Self {
            transport,
            display: Display::new(config.width, config.height, config.prompt, config.echo),
            cursor: Cursor::new(),
            history: History::new(),
            input: IoBuffer::new(config.eol_in),
            output: IoBuffer::new(config.eol_out),
            paste: PasteState::Inactive,
            auto_flush: config.auto_flush,
        }
    }

    /// The viewport.
    #[must_use]
    pub fn display(&self) -> &Display {
        &self.display
    }

    /// Mutable viewport access (resize, echo, prompt).
    pub fn display_mut(&mut self) -> &mut Display {
        &mut self.display
    }

    /// The cursor.
    #[must_use]
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// The history ring.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The line currently being edited.
    #[must_use]
    pub fn line(&self) -> &Line {
        self.history.line()
    }

    /// Borrow the pending line together with its drawing context, for
    /// direct line manipulation outside the read-line loop.
    pub fn line_editor(&mut self) -> (&mut Line, Screen<'_>) {
        let Terminal {
            display,
            cursor,
            history,
            output,
            ..
        } = self;
        (
            history.line_mut(),
            Screen {
                display: &*display,
                cursor,
                out: output,
            },
        )
    }

    /// Pull whatever the transport has ready into the IN ring.
    ///
    /// # Errors
    ///
    /// `Error::ReadOverflow` when IN is full; transport failures pass
    /// through. End of stream is reported as `Ok(0)`.
    pub fn swell(&mut self) -> Result<usize, Error> {
        self.input.read_from(&mut self.transport)
    }

    /// Drain the OUT ring to the transport.
    ///
    /// # Errors
    ///
    /// Transport failures pass through; un-drained bytes stay buffered.
    pub fn flush(&mut self) -> Result<usize, Error> {
        self.output.write_to(&mut self.transport)
    }

    /// Stage raw bytes (for example, terminal mode sequences) in the OUT
    /// ring ahead of the next flush.
    pub fn output_mut(&mut self) -> &mut IoBuffer {
        &mut self.output
    }

    /// Terminate the current display line: emit the end-of-line, drain OUT
    /// to the transport, and reset the line and cursor for a fresh one.
    ///
    /// # Errors
    ///
    /// The first overflow or transport failure observed; the resets happen
    /// regardless.
    pub fn line_feed(&mut self) -> Result<(), Error> {
        let mut first = None;
        if let Err(e) = self.output.write_eol() {
            keep_first(&mut first, e);
        }
        if let Err(e) = self.flush() {
            keep_first(&mut first, e);
        }
        self.history.line_mut().reset();
        self.cursor.reset();
        match first {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Read one line of input, editing interactively until Enter.
    ///
    /// The committed line is copied as UTF-8 into `buf`. On success the
    /// result carries the byte count and whether the whole line arrived
    /// via bracketed paste.
    ///
    /// # Errors
    ///
    /// `Error::InvalidArgument` for an empty `buf`; `Error::Interrupted`
    /// when the user hits the interrupt key; `Error::EndOfStream` for
    /// end-of-input on an empty line; transport failures pass through.
    /// Every return path runs the same end-of-line tail, so the line and
    /// cursor are always left reset.
    pub fn read_line(&mut self, buf: &mut [u8]) -> Result<LineRead, Error> {
        if buf.is_empty() {
            return Err(Error::InvalidArgument);
        }
        let mut first = None;
        self.display.set_prompt_enabled(true);
        // A paste spanning several lines keeps marking each continuation
        // line as pasted-only until ordinary typing intervenes.
        if self.paste == PasteState::Active && self.line().rune_count() == 0 {
            self.history.line_mut().set_pasted(true);
        }
        {
            let Terminal {
                display,
                cursor,
                output,
                ..
            } = self;
            let mut screen = Screen {
                display: &*display,
                cursor,
                out: output,
            };
            if let Err(e) = screen.show_prompt() {
                keep_first(&mut first, e);
            }
        }
        if let Err(e) = self.flush() {
            keep_first(&mut first, e);
        }

        let mut end = false;
        let mut wrote_eol = false;
        while !end {
            while !self.input.is_empty() {
                let pasting = self.paste == PasteState::Active;
                match key_parser::parse(&mut self.input, pasting) {
                    None => break, // partial sequence: need more bytes
                    Some((k, _)) if k == key::UNKNOWN => {
                        debug!("unrecognized sequence ends the line");
                        if let Some(e) = self.end_line_literally() {
                            keep_first(&mut first, e);
                        }
                        wrote_eol = true;
                        end = true;
                    }
                    Some((k, _)) => {
                        trace!(key = k.value(), pasting, "dispatch");
                        let (done, err) = self.handle_key(k);
                        if let Some(e) = err {
                            keep_first(&mut first, e);
                        }
                        end = done;
                        if end {
                            break;
                        }
                        if self.auto_flush {
                            if let Err(e) = self.flush() {
                                keep_first(&mut first, e);
                            }
                        }
                    }
                }
            }
            if end {
                break;
            }
            if let Err(e) = self.flush() {
                keep_first(&mut first, e);
            }
            match self.swell() {
                // No progress: the transport has nothing further to give.
                Ok(0) => {
                    keep_first(&mut first, Error::EndOfStream);
                    end = true;
                }
                Ok(_n) => {
                    trace!(bytes = _n, "refill");
                }
                Err(e) => {
                    keep_first(&mut first, e);
                    end = true;
                }
            }
        }

        // End-of-line tail, shared by every return path: cancellation
        // snapshots the line just like Enter does.
        if self.line().is_pasted() {
            keep_first(&mut first, Error::PasteIndicator);
        }
        if self.display.echo() {
            self.history.add();
        }
        let len = self.history.line_mut().read(buf);
        if wrote_eol {
            if let Err(e) = self.flush() {
                keep_first(&mut first, e);
            }
            self.history.line_mut().reset();
            self.cursor.reset();
        } else if let Err(e) = self.line_feed() {
            keep_first(&mut first, e);
        }
        match first {
            None => Ok(LineRead { len, pasted: false }),
            Some(Error::PasteIndicator) => Ok(LineRead { len, pasted: true }),
            Some(e) => Err(e),
        }
    }

    /// Unknown-sequence exit: park the cursor at the end, emit the
    /// end-of-line, and take whatever else IN holds into the line as
    /// literal text.
    fn end_line_literally(&mut self) -> Option<Error> {
        let mut first = None;
        {
            let Terminal {
                display,
                cursor,
                history,
                output,
                ..
            } = self;
            let mut screen = Screen {
                display: &*display,
                cursor,
                out: output,
            };
            let line = history.line_mut();
            let count = line.rune_count();
            if let Err(e) = line.move_cursor_to(count, &mut screen) {
                keep_first(&mut first, e);
            }
        }
        if let Err(e) = self.output.write_eol() {
            keep_first(&mut first, e);
        }
        let mut rest = [0u8; BYTES_PER_BUFFER];
        let n = self.input.read(&mut rest);
        if n > 0 {
            if let Err(e) = self.history.line_mut().append(&rest[..n]) {
                keep_first(&mut first, e);
            }
        }
        first
    }

    /// Dispatch one key into the line. Returns whether the line ended and
    /// the first error the operation produced.
    fn handle_key(&mut self, k: Rune) -> (bool, Option<Error>) {
        let mut first = None;
        let mut end = false;
        let Terminal {
            display,
            cursor,
            history,
            output,
            paste,
            ..
        } = self;
        let mut screen = Screen {
            display: &*display,
            cursor,
            out: output,
        };

        if *paste == PasteState::Active && k != key::ENTER && k != key::PASTE_END {
            if let Err(e) = history.line_mut().insert_rune(k, &mut screen) {
                keep_first(&mut first, e);
            }
            return (false, first);
        }

        match k {
            key::ENTER => {
                let line = history.line_mut();
                let count = line.rune_count();
                if let Err(e) = line.move_cursor_to(count, &mut screen) {
                    keep_first(&mut first, e);
                }
                end = true;
            }
            key::BACKSPACE => {
                let line = history.line_mut();
                if line.position() > 0 {
                    if let Err(e) = line.erase_previous(1, &mut screen) {
                        keep_first(&mut first, e);
                    }
                }
            }
            key::INTERRUPT => {
                keep_first(&mut first, Error::Interrupted);
                end = true;
            }
            key::END_OF_FILE => {
                let line = history.line_mut();
                if line.rune_count() == 0 {
                    keep_first(&mut first, Error::EndOfStream);
                    end = true;
                } else if line.position() < line.rune_count() {
                    // Rub out the rune under the cursor.
                    if let Err(e) = line.move_cursor(1, &mut screen) {
                        keep_first(&mut first, e);
                    }
                    if let Err(e) = line.erase_previous(1, &mut screen) {
                        keep_first(&mut first, e);
                    }
                }
            }
            key::DELETE => {
                let line = history.line_mut();
                if line.position() < line.rune_count() {
                    if let Err(e) = line.move_cursor(1, &mut screen) {
                        keep_first(&mut first, e);
                    }
                    if let Err(e) = line.erase_previous(1, &mut screen) {
                        keep_first(&mut first, e);
                    }
                }
            }
            key::UP => {
                if let Err(e) = history.back(&mut screen) {
                    keep_first(&mut first, e);
                }
            }
            key::DOWN => {
                if let Err(e) = history.forward(&mut screen) {
                    keep_first(&mut first, e);
                }
            }
            key::LEFT => {
                let line = history.line_mut();
                if line.position() > 0 {
                    if let Err(e) = line.move_cursor(-1, &mut screen) {
                        keep_first(&mut first, e);
                    }
                }
            }
            key::RIGHT => {
                let line = history.line_mut();
                if line.position() < line.rune_count() {
                    if let Err(e) = line.move_cursor(1, &mut screen) {
                        keep_first(&mut first, e);
                    }
                }
            }
            key::ALT_LEFT => {
                let line = history.line_mut();
                let n = line.runes_to_word_start();
                if let Err(e) = line.move_cursor(-(n as isize), &mut screen) {
                    keep_first(&mut first, e);
                }
            }
            key::ALT_RIGHT => {
                let line = history.line_mut();
                let n = line.runes_to_next_word();
                if let Err(e) = line.move_cursor(n as isize, &mut screen) {
                    keep_first(&mut first, e);
                }
            }
            key::HOME => {
                let line = history.line_mut();
                if line.position() > 0 {
                    if let Err(e) = line.move_cursor_to(0, &mut screen) {
                        keep_first(&mut first, e);
                    }
                }
            }
            key::END => {
                let line = history.line_mut();
                let count = line.rune_count();
                if line.position() < count {
                    if let Err(e) = line.move_cursor_to(count, &mut screen) {
                        keep_first(&mut first, e);
                    }
                }
            }
            key::DELETE_WORD => {
                let line = history.line_mut();
                let forward = line.runes_to_word_end();
                if let Err(e) = line.move_cursor(forward as isize, &mut screen) {
                    keep_first(&mut first, e);
                }
                let back = line.runes_to_word_start();
                if let Err(e) = line.erase_previous(back, &mut screen) {
                    keep_first(&mut first, e);
                }
            }
            key::KILL_PREVIOUS => {
                let line = history.line_mut();
                let pos = line.position();
                if let Err(e) = line.erase_previous(pos, &mut screen) {
                    keep_first(&mut first, e);
                }
            }
            key::KILL => {
                let line = history.line_mut();
                let pos = line.position();
                let count = line.rune_count();
                if let Err(e) = line.move_cursor_to(count, &mut screen) {
                    keep_first(&mut first, e);
                }
                if let Err(e) = line.erase_previous(count - pos, &mut screen) {
                    keep_first(&mut first, e);
                }
            }
            key::CLEAR_SCREEN => {
                let pos = history.line().position();
                if let Err(e) = history.line_mut().clear_screen(&mut screen) {
                    keep_first(&mut first, e);
                }
                if let Err(e) = screen.show_prompt() {
                    keep_first(&mut first, e);
                }
                if let Err(e) = history.line().flush(&mut screen) {
                    keep_first(&mut first, e);
                }
                if let Err(e) = history.line_mut().move_cursor_to(pos, &mut screen) {
                    keep_first(&mut first, e);
                }
            }
            key::PASTE_START => {
                *paste = PasteState::Active;
                let line = history.line_mut();
                if line.rune_count() == 0 {
                    line.set_pasted(true);
                }
            }
            key::PASTE_END => {
                *paste = PasteState::Inactive;
            }
            _ => {
                let line = history.line_mut();
                if line.rune_count() < RUNES_PER_LINE {
                    line.set_pasted(false);
                    if key::is_printable(k) {
                        if let Err(e) = line.insert_rune(k, &mut screen) {
                            keep_first(&mut first, e);
                        }
                    }
                }
            }
        }
        (end, first)
    }
}
