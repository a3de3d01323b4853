#![forbid(unsafe_code)]

//! Interactive demo: the line engine over stdin/stdout in raw mode.
//!
//! Type lines at the prompt; each commit is echoed back with its byte
//! count. Arrow keys, Home/End, Alt-arrows, Ctrl-K/U/W, and bracketed
//! paste all work. Up/Down browse history. Ctrl-D on an empty line (or
//! Ctrl-C) exits.
//!
//! Set `RUST_LOG=mline_core=trace` to watch the dispatch stream.

use std::io;
use std::process::ExitCode;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode, size};
use mline_core::{Config, Error, StdTransport, Terminal};
use tracing_subscriber::EnvFilter;

/// Ask the host terminal to wrap pasted text in bracket markers.
const ENABLE_BRACKETED_PASTE: &[u8] = b"\x1b[?2004h";
/// Restore ordinary paste behavior on exit.
const DISABLE_BRACKETED_PASTE: &[u8] = b"\x1b[?2004l";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = enable_raw_mode() {
        eprintln!("cannot enter raw mode: {e}");
        return ExitCode::FAILURE;
    }
    let result = run();
    let _ = disable_raw_mode();
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("demo failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Error> {
    let (width, height) = size().unwrap_or((80, 24));
    let mut terminal = Terminal::new(
        StdTransport::new(io::stdin(), io::stdout()),
        Config {
            width: u32::from(width),
            height: u32::from(height),
            prompt: "mline> ",
            ..Config::default()
        },
    );

    use_bracketed_paste(&mut terminal, true)?;
    let mut buf = [0u8; 4096];
    loop {
        match terminal.read_line(&mut buf) {
            Ok(line) => {
                let text = String::from_utf8_lossy(&buf[..line.len]);
                let tag = if line.pasted { " (pasted)" } else { "" };
                // Raw mode: move to column 0 explicitly.
                print!("read {} bytes{}: {:?}\r\n", line.len, tag, text);
            }
            Err(Error::Interrupted) | Err(Error::EndOfStream) => break,
            Err(e) => {
                use_bracketed_paste(&mut terminal, false)?;
                return Err(e);
            }
        }
    }
    use_bracketed_paste(&mut terminal, false)?;
    print!("bye\r\n");
    Ok(())
}

fn use_bracketed_paste<T: mline_core::Transport>(
    terminal: &mut Terminal<T>,
    enable: bool,
) -> Result<(), Error> {
    let seq = if enable {
        ENABLE_BRACKETED_PASTE
    } else {
        DISABLE_BRACKETED_PASTE
    };
    terminal.output_mut().write(seq)?;
    terminal.flush()?;
    Ok(())
}
