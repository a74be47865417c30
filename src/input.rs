use std::io::{self, BufRead, Read};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal;

/// A provider of single-character reads for the `,` operator.
///
/// Each call yields either exactly one unit or `None` for end of input.
/// Environment failures (an unreadable source) come back as `Err`; running
/// out of input is not a failure.
pub trait InputSource {
    fn read_unit(&mut self) -> io::Result<Option<char>>;
}

/// Reads one byte at a time from any `Read` stream.
///
/// Bytes map to code points 0..=255.
pub struct StreamInput<R> {
    inner: R,
}

impl<R: Read> StreamInput<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: Read> InputSource for StreamInput<R> {
    fn read_unit(&mut self) -> io::Result<Option<char>> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0] as char)),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

/// Interactive single-key reader, the default input endpoint.
///
/// Puts the terminal into raw mode for the duration of one keypress, so the
/// key is consumed without echo and without waiting for a line terminator.
/// When raw mode is unavailable (standard input is not a terminal), falls
/// back to reading a buffered line and taking its first character.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }

    fn read_key_raw() -> io::Result<Option<char>> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char(c) => return Ok(Some(c)),
                    KeyCode::Enter => return Ok(Some('\n')),
                    KeyCode::Tab => return Ok(Some('\t')),
                    KeyCode::Backspace => return Ok(Some('\u{8}')),
                    KeyCode::Esc => return Ok(Some('\u{1b}')),
                    _ => {}
                },
                _ => {}
            }
        }
    }

    fn read_line_first_char() -> io::Result<Option<char>> {
        let mut line = String::new();
        let n = io::stdin().lock().read_line(&mut line)?;
        if n == 0 {
            Ok(None)
        } else {
            Ok(line.chars().next())
        }
    }
}

impl InputSource for TerminalInput {
    fn read_unit(&mut self) -> io::Result<Option<char>> {
        match terminal::enable_raw_mode() {
            Ok(()) => {
                let key = Self::read_key_raw();
                // Restore the terminal before surfacing any read error.
                let restored = terminal::disable_raw_mode();
                let key = key?;
                restored?;
                Ok(key)
            }
            Err(_) => Self::read_line_first_char(),
        }
    }
}
